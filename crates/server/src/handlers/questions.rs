//! # Question & Feedback Handlers
//!
//! Submitting a swing question (`POST /questions/`) and listing stored
//! questions and feedback.

use super::{AppError, AppState};
use crate::{
    auth::middleware::CurrentIdentity,
    extract::{AppJson, AppQuery},
    types::{CreatedResponse, FeedbackOut, ListParams, QuestionCreate, QuestionOut},
};
use axum::{extract::State, http::StatusCode, Json};
use swingsense::{constants::TASK_SWING_FEEDBACK, feedback};
use tracing::info;

pub async fn create_question_handler(
    State(app_state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    AppJson(payload): AppJson<QuestionCreate>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    info!(
        chars = payload.question.chars().count(),
        "Received swing question"
    );
    let task = app_state.task(TASK_SWING_FEEDBACK)?;

    let question = feedback::submit_question(
        &*app_state.sqlite_provider,
        &**app_state.ai_provider,
        task,
        &payload.question,
        identity.user_id(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: question.id }),
    ))
}

pub async fn list_questions_handler(
    State(app_state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<Vec<QuestionOut>>, AppError> {
    let questions = feedback::list_questions(&*app_state.sqlite_provider, params.limit).await?;
    Ok(Json(questions.into_iter().map(QuestionOut::from).collect()))
}

pub async fn list_feedback_handler(
    State(app_state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<Vec<FeedbackOut>>, AppError> {
    let feedback = feedback::list_feedback(&*app_state.sqlite_provider, params.limit).await?;
    Ok(Json(feedback.into_iter().map(FeedbackOut::from).collect()))
}
