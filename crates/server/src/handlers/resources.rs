//! # Resource Suggestion Handler

use super::{AppError, AppState};
use crate::{auth::middleware::CurrentIdentity, extract::AppQuery, types::ResourceParams};
use axum::{extract::State, Json};
use serde_json::{json, Value};
use swingsense::{constants::TASK_RESOURCE_SUGGESTIONS, resources};
use tracing::info;

/// `GET /resources?issue=...`
pub async fn resources_handler(
    State(app_state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    AppQuery(params): AppQuery<ResourceParams>,
) -> Result<Json<Value>, AppError> {
    let issue = params
        .issue
        .filter(|i| !i.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Query parameter 'issue' is required.".to_string()))?;
    info!("Received resource request for issue: '{issue}'");
    let task = app_state.task(TASK_RESOURCE_SUGGESTIONS)?;

    let suggestions =
        resources::suggest_resources(&**app_state.ai_provider, task, &issue).await?;

    Ok(Json(json!({
        "resources": suggestions,
        "filter": issue,
        "user_id": identity.user_id(),
    })))
}
