use super::{
    format_timestamp, optional_text, optional_text_value, sql, text, timestamp, SqliteProvider,
};
use crate::errors::StorageError;
use crate::providers::db::storage::QuestionStore;
use crate::types::{Feedback, Question, SwingLog};
use async_trait::async_trait;
use tracing::{debug, warn};
use turso::{params, Connection, Value as TursoValue};

async fn insert_pair(
    conn: &Connection,
    question: &Question,
    feedback: &Feedback,
) -> Result<(), turso::Error> {
    conn.execute(
        sql::INSERT_QUESTION,
        vec![
            TursoValue::Text(question.id.clone()),
            optional_text_value(&question.user_id),
            TursoValue::Text(question.question.clone()),
            TursoValue::Text(format_timestamp(&question.created_at)),
        ],
    )
    .await?;
    conn.execute(
        sql::INSERT_FEEDBACK,
        params![
            feedback.id.clone(),
            feedback.question_id.clone(),
            feedback.feedback.clone(),
            format_timestamp(&feedback.created_at)
        ],
    )
    .await?;
    Ok(())
}

async fn delete_pair(conn: &Connection, question_id: &str) -> Result<u64, turso::Error> {
    conn.execute(sql::DELETE_FEEDBACK_FOR_QUESTION, params![question_id])
        .await?;
    conn.execute(sql::DELETE_QUESTION, params![question_id])
        .await
}

#[async_trait]
impl QuestionStore for SqliteProvider {
    async fn insert_question_with_feedback(
        &self,
        question: &Question,
        feedback: &Feedback,
    ) -> Result<(), StorageError> {
        let conn = self.db.connect()?;
        conn.execute("BEGIN TRANSACTION", ()).await?;
        if let Err(e) = insert_pair(&conn, question, feedback).await {
            warn!("Failed to store question '{}': {e}. Rolling back transaction.", question.id);
            conn.execute("ROLLBACK", ()).await?;
            return Err(e.into());
        }
        conn.execute("COMMIT", ()).await?;
        debug!(question_id = %question.id, feedback_id = %feedback.id, "Stored question with feedback");
        Ok(())
    }

    async fn list_questions(&self, limit: u32) -> Result<Vec<Question>, StorageError> {
        let conn = self.db.connect()?;
        let mut rows = conn.query(sql::LIST_QUESTIONS, params![limit as i64]).await?;
        let mut questions = Vec::new();
        while let Some(row) = rows.next().await? {
            questions.push(Question {
                id: text(&row, 0, "id")?,
                question: text(&row, 1, "question")?,
                created_at: timestamp(&row, 2, "created_at")?,
                user_id: optional_text(&row, 3, "user_id")?,
            });
        }
        Ok(questions)
    }

    async fn list_feedback(&self, limit: u32) -> Result<Vec<Feedback>, StorageError> {
        let conn = self.db.connect()?;
        let mut rows = conn.query(sql::LIST_FEEDBACK, params![limit as i64]).await?;
        let mut feedback = Vec::new();
        while let Some(row) = rows.next().await? {
            feedback.push(Feedback {
                id: text(&row, 0, "id")?,
                question_id: text(&row, 1, "question_id")?,
                feedback: text(&row, 2, "feedback")?,
                created_at: timestamp(&row, 3, "created_at")?,
            });
        }
        Ok(feedback)
    }

    async fn list_logs(&self, limit: u32) -> Result<Vec<SwingLog>, StorageError> {
        let conn = self.db.connect()?;
        let mut rows = conn.query(sql::LIST_LOGS, params![limit as i64]).await?;
        let mut logs = Vec::new();
        while let Some(row) = rows.next().await? {
            logs.push(SwingLog {
                id: text(&row, 0, "id")?,
                swing_issue: text(&row, 1, "question")?,
                feedback: text(&row, 2, "feedback")?,
                created_at: timestamp(&row, 3, "created_at")?,
            });
        }
        Ok(logs)
    }

    async fn delete_question(&self, question_id: &str) -> Result<bool, StorageError> {
        let conn = self.db.connect()?;
        conn.execute("BEGIN TRANSACTION", ()).await?;
        let deleted = match delete_pair(&conn, question_id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!("Failed to delete question '{question_id}': {e}. Rolling back transaction.");
                conn.execute("ROLLBACK", ()).await?;
                return Err(e.into());
            }
        };
        conn.execute("COMMIT", ()).await?;
        Ok(deleted > 0)
    }
}
