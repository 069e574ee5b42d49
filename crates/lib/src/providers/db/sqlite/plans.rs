use super::{
    format_timestamp, integer, optional_text, optional_text_value, real, sql, text, timestamp,
    SqliteProvider,
};
use crate::errors::StorageError;
use crate::providers::db::storage::PlanStore;
use crate::types::TrainingPlan;
use async_trait::async_trait;
use turso::Value as TursoValue;

#[async_trait]
impl PlanStore for SqliteProvider {
    async fn insert_training_plan(&self, plan: &TrainingPlan) -> Result<(), StorageError> {
        let conn = self.db.connect()?;
        conn.execute(
            sql::INSERT_TRAINING_PLAN,
            vec![
                TursoValue::Text(plan.id.clone()),
                optional_text_value(&plan.user_id),
                TursoValue::Text(plan.plan.clone()),
                TursoValue::Integer(plan.years_played),
                TursoValue::Real(plan.handicap),
                TursoValue::Text(plan.strengths.clone()),
                TursoValue::Text(plan.weaknesses.clone()),
                TursoValue::Text(plan.goals.clone()),
                TursoValue::Text(format_timestamp(&plan.created_at)),
            ],
        )
        .await?;
        Ok(())
    }

    async fn latest_training_plan(&self) -> Result<Option<TrainingPlan>, StorageError> {
        let conn = self.db.connect()?;
        let mut rows = conn.query(sql::LATEST_TRAINING_PLAN, ()).await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        Ok(Some(TrainingPlan {
            id: text(&row, 0, "id")?,
            plan: text(&row, 1, "plan")?,
            years_played: integer(&row, 2, "years_played")?,
            handicap: real(&row, 3, "handicap")?,
            strengths: text(&row, 4, "strengths")?,
            weaknesses: text(&row, 5, "weaknesses")?,
            goals: text(&row, 6, "goals")?,
            created_at: timestamp(&row, 7, "created_at")?,
            user_id: optional_text(&row, 8, "user_id")?,
        }))
    }
}
