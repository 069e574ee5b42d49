//! # Progress Handlers
//!
//! Both endpoints require a verified caller; metrics are always scoped to
//! the token's subject.

use super::{AppError, AppState};
use crate::{
    auth::middleware::VerifiedUser,
    extract::{AppJson, AppQuery},
    types::{ProgressList, ProgressParams, ProgressRecorded},
};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use swingsense::progress;
use tracing::info;

pub async fn record_progress_handler(
    State(app_state): State<AppState>,
    VerifiedUser(claims): VerifiedUser,
    AppJson(metric): AppJson<Value>,
) -> Result<(StatusCode, Json<ProgressRecorded>), AppError> {
    info!(user_id = %claims.sub, "Received progress metric");
    let record =
        progress::record_progress(&*app_state.sqlite_provider, metric, &claims.sub).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProgressRecorded {
            message: "Progress recorded".to_string(),
            data: record.metric,
            user_id: claims.sub,
            timestamp: record.created_at,
            id: record.id,
        }),
    ))
}

pub async fn list_progress_handler(
    State(app_state): State<AppState>,
    VerifiedUser(claims): VerifiedUser,
    AppQuery(params): AppQuery<ProgressParams>,
) -> Result<Json<ProgressList>, AppError> {
    let progress = progress::list_progress(
        &*app_state.sqlite_provider,
        &claims.sub,
        params.start_date,
        params.end_date,
    )
    .await?;

    Ok(Json(ProgressList {
        progress,
        user_id: claims.sub,
        start_date: params.start_date,
        end_date: params.end_date,
    }))
}
