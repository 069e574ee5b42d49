//! # Training Plan Handlers

use super::{AppError, AppState};
use crate::{auth::middleware::CurrentIdentity, extract::AppJson, types::PlanCreatedResponse};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use swingsense::{constants::TASK_TRAINING_PLAN, plans, PlanInput};
use tracing::info;

pub async fn generate_plan_handler(
    State(app_state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    AppJson(input): AppJson<PlanInput>,
) -> Result<(StatusCode, Json<PlanCreatedResponse>), AppError> {
    info!(
        years_played = input.years_played,
        handicap = input.handicap,
        "Received training plan request"
    );
    let task = app_state.task(TASK_TRAINING_PLAN)?;

    let plan = plans::generate_plan(
        &*app_state.sqlite_provider,
        &**app_state.ai_provider,
        task,
        input,
        identity.user_id(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(PlanCreatedResponse {
            plan: plan.plan,
            id: plan.id,
        }),
    ))
}

/// Returns the latest plan's fields, or `{"plan": null}` when none exists.
pub async fn current_plan_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let body = match plans::current_plan(&*app_state.sqlite_provider).await? {
        Some(plan) => serde_json::to_value(plan).map_err(anyhow::Error::from)?,
        None => json!({ "plan": null }),
    };
    Ok(Json(body))
}
