use super::{
    format_timestamp, optional_text, optional_text_value, sql, text, timestamp, SqliteProvider,
};
use crate::errors::StorageError;
use crate::providers::db::storage::ProgressStore;
use crate::types::ProgressMetric;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use turso::{params, Value as TursoValue};

// Sentinels for an open range: every stored timestamp sorts between them.
const OPEN_LOWER_BOUND: &str = "";
const OPEN_UPPER_BOUND: &str = "~";

#[async_trait]
impl ProgressStore for SqliteProvider {
    async fn insert_progress_metric(&self, metric: &ProgressMetric) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&metric.metric)?;
        let conn = self.db.connect()?;
        conn.execute(
            sql::INSERT_PROGRESS_METRIC,
            vec![
                TursoValue::Text(metric.id.clone()),
                optional_text_value(&metric.user_id),
                TursoValue::Text(payload),
                TursoValue::Text(format_timestamp(&metric.created_at)),
            ],
        )
        .await?;
        Ok(())
    }

    async fn list_progress_metrics(
        &self,
        user_id: &str,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Result<Vec<ProgressMetric>, StorageError> {
        let lower = from
            .map(|ts| format_timestamp(&ts))
            .unwrap_or_else(|| OPEN_LOWER_BOUND.to_string());
        let upper = until
            .map(|ts| format_timestamp(&ts))
            .unwrap_or_else(|| OPEN_UPPER_BOUND.to_string());

        let conn = self.db.connect()?;
        let mut rows = conn
            .query(sql::LIST_PROGRESS_METRICS, params![user_id, lower, upper])
            .await?;

        let mut metrics = Vec::new();
        while let Some(row) = rows.next().await? {
            let raw = text(&row, 2, "metric")?;
            metrics.push(ProgressMetric {
                id: text(&row, 0, "id")?,
                user_id: optional_text(&row, 1, "user_id")?,
                metric: serde_json::from_str(&raw)?,
                created_at: timestamp(&row, 3, "created_at")?,
            });
        }
        Ok(metrics)
    }
}
