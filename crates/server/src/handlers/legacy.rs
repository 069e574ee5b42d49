//! # Swing Log Handlers
//!
//! The minimal log surface: `POST /feedback` answers a swing issue directly and
//! `GET /logs` lists issues joined with their feedback. Both share the
//! question and feedback tables with the structured endpoints.

use super::{AppError, AppState};
use crate::{
    auth::middleware::CurrentIdentity,
    extract::{AppJson, AppQuery},
    types::{ListParams, SwingIssueRequest, SwingIssueResponse},
};
use axum::{extract::State, Json};
use swingsense::{constants::TASK_SWING_LOG_FEEDBACK, feedback, SwingLog};
use tracing::info;

pub async fn swing_issue_handler(
    State(app_state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    AppJson(payload): AppJson<SwingIssueRequest>,
) -> Result<Json<SwingIssueResponse>, AppError> {
    info!("Received swing issue: '{}'", payload.swing_issue);
    let task = app_state.task(TASK_SWING_LOG_FEEDBACK)?;

    let log = feedback::submit_swing_issue(
        &*app_state.sqlite_provider,
        &**app_state.ai_provider,
        task,
        &payload.swing_issue,
        identity.user_id(),
    )
    .await?;

    Ok(Json(SwingIssueResponse {
        feedback: log.feedback,
    }))
}

pub async fn list_logs_handler(
    State(app_state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<Vec<SwingLog>>, AppError> {
    let logs = feedback::list_logs(&*app_state.sqlite_provider, params.limit).await?;
    Ok(Json(logs))
}
