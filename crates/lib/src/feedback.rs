//! # Swing Feedback
//!
//! Submitting a swing question (ask the AI, then store question and feedback
//! together) and listing what has been stored.

use crate::constants::{
    DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, QUESTION_MAX_CHARS, QUESTION_MIN_CHARS,
};
use crate::errors::CoachError;
use crate::prompts::PromptTask;
use crate::providers::ai::AiProvider;
use crate::providers::db::storage::QuestionStore;
use crate::types::{new_id, timestamp_now, Feedback, Question, SwingLog};
use tracing::{debug, info, warn};

/// Checks the character count of a question, counted on the raw text.
/// Whitespace-only text is rejected regardless of length.
pub fn validate_question(question: &str) -> Result<(), CoachError> {
    if question.trim().is_empty() {
        return Err(CoachError::invalid("question", "must not be blank"));
    }
    let chars = question.chars().count();
    if !(QUESTION_MIN_CHARS..=QUESTION_MAX_CHARS).contains(&chars) {
        return Err(CoachError::invalid(
            "question",
            format!(
                "must be between {QUESTION_MIN_CHARS} and {QUESTION_MAX_CHARS} characters, got {chars}"
            ),
        ));
    }
    Ok(())
}

/// Clamps a requested listing size into `[1, MAX_LIST_LIMIT]`.
pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

/// Generates feedback first, then writes both rows in one transaction.
/// A generation failure leaves the store untouched.
async fn ask_and_store(
    store: &dyn QuestionStore,
    ai: &dyn AiProvider,
    task: &PromptTask,
    question: &str,
    user_id: Option<&str>,
) -> Result<(Question, Feedback), CoachError> {
    validate_question(question)?;

    let user_prompt = task.render_user_prompt(&[("question", question)]);
    debug!(user_prompt = %user_prompt, "Requesting swing feedback");

    let text = ai
        .complete(&task.system_prompt, &user_prompt, &task.options)
        .await
        .map_err(|e| {
            warn!("Feedback generation failed, nothing stored: {e}");
            CoachError::FeedbackGenerationFailed(e)
        })?;

    let created_at = timestamp_now();
    let question = Question {
        id: new_id(),
        question: question.to_string(),
        created_at,
        user_id: user_id.map(str::to_string),
    };
    let feedback = Feedback {
        id: new_id(),
        question_id: question.id.clone(),
        feedback: text,
        created_at,
    };

    store
        .insert_question_with_feedback(&question, &feedback)
        .await?;
    info!(question_id = %question.id, "Stored swing question with feedback");

    Ok((question, feedback))
}

/// Submits a question through the `swing_feedback` task and returns the stored question.
pub async fn submit_question(
    store: &dyn QuestionStore,
    ai: &dyn AiProvider,
    task: &PromptTask,
    question: &str,
    user_id: Option<&str>,
) -> Result<Question, CoachError> {
    let (question, _) = ask_and_store(store, ai, task, question, user_id).await?;
    Ok(question)
}

/// The swing-log flavour of [`submit_question`]: same validation and
/// atomicity, returning the joined log entry.
pub async fn submit_swing_issue(
    store: &dyn QuestionStore,
    ai: &dyn AiProvider,
    task: &PromptTask,
    swing_issue: &str,
    user_id: Option<&str>,
) -> Result<SwingLog, CoachError> {
    let (question, feedback) = ask_and_store(store, ai, task, swing_issue, user_id).await?;
    Ok(SwingLog {
        id: question.id,
        swing_issue: question.question,
        feedback: feedback.feedback,
        created_at: question.created_at,
    })
}

pub async fn list_questions(
    store: &dyn QuestionStore,
    limit: Option<u32>,
) -> Result<Vec<Question>, CoachError> {
    Ok(store.list_questions(clamp_limit(limit)).await?)
}

pub async fn list_feedback(
    store: &dyn QuestionStore,
    limit: Option<u32>,
) -> Result<Vec<Feedback>, CoachError> {
    Ok(store.list_feedback(clamp_limit(limit)).await?)
}

pub async fn list_logs(
    store: &dyn QuestionStore,
    limit: Option<u32>,
) -> Result<Vec<SwingLog>, CoachError> {
    Ok(store.list_logs(clamp_limit(limit)).await?)
}
