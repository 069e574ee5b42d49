//! # Resource Suggestions
//!
//! Asks the AI for online resources (articles, videos, drills) that address a
//! swing issue. Suggestions are returned to the caller and never stored.

use crate::constants::MALFORMED_SNIPPET_CHARS;
use crate::errors::{AiError, CoachError};
use crate::prompts::PromptTask;
use crate::providers::ai::AiProvider;
use crate::types::ResourceSuggestion;
use tracing::{debug, warn};

/// The number of suggestions the prompt asks for.
const EXPECTED_SUGGESTIONS: usize = 3;

/// Parses the raw AI answer strictly as a JSON array of suggestions.
pub fn parse_suggestions(raw: &str) -> Result<Vec<ResourceSuggestion>, CoachError> {
    serde_json::from_str::<Vec<ResourceSuggestion>>(raw).map_err(|e| {
        let snippet: String = raw.chars().take(MALFORMED_SNIPPET_CHARS).collect();
        debug!("Suggestion parse error: {e}");
        CoachError::Upstream(AiError::UpstreamMalformed(format!(
            "Invalid JSON returned by AI: {snippet}"
        )))
    })
}

pub async fn suggest_resources(
    ai: &dyn AiProvider,
    task: &PromptTask,
    issue: &str,
) -> Result<Vec<ResourceSuggestion>, CoachError> {
    let issue = issue.trim();
    if issue.is_empty() {
        return Err(CoachError::invalid("issue", "must not be empty"));
    }

    let user_prompt = task.render_user_prompt(&[("issue", issue)]);
    let raw = ai
        .complete(&task.system_prompt, &user_prompt, &task.options)
        .await?;

    let suggestions = parse_suggestions(&raw)?;
    if suggestions.len() != EXPECTED_SUGGESTIONS {
        warn!(
            "Expected {EXPECTED_SUGGESTIONS} resource suggestions, got {}",
            suggestions.len()
        );
    }
    Ok(suggestions)
}
