//! # Progress Metrics
//!
//! Users record free-form progress payloads (JSON objects) and read them back
//! filtered by an inclusive date range.

use crate::errors::CoachError;
use crate::providers::db::storage::ProgressStore;
use crate::types::{new_id, timestamp_now, ProgressMetric};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde_json::Value;
use tracing::info;

/// Stores a metric for `user_id`. The metric must be a non-empty JSON object.
pub async fn record_progress(
    store: &dyn ProgressStore,
    metric: Value,
    user_id: &str,
) -> Result<ProgressMetric, CoachError> {
    match &metric {
        Value::Object(map) if !map.is_empty() => {}
        _ => {
            return Err(CoachError::invalid(
                "metric",
                "must be a non-empty JSON object",
            ))
        }
    }

    let record = ProgressMetric {
        id: new_id(),
        user_id: Some(user_id.to_string()),
        metric,
        created_at: timestamp_now(),
    };
    store.insert_progress_metric(&record).await?;
    info!(metric_id = %record.id, user_id = %user_id, "Recorded progress metric");
    Ok(record)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Lists a user's metrics whose creation date lies in `[start_date, end_date]`.
pub async fn list_progress(
    store: &dyn ProgressStore,
    user_id: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Vec<ProgressMetric>, CoachError> {
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if start > end {
            return Err(CoachError::invalid(
                "start_date",
                "must not be after end_date",
            ));
        }
    }

    let from = start_date.map(start_of_day);
    let until = end_date
        .and_then(|d| d.checked_add_days(Days::new(1)))
        .map(start_of_day);

    Ok(store.list_progress_metrics(user_id, from, until).await?)
}
