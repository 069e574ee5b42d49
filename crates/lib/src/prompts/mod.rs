//! # Prompt Tasks
//!
//! A `PromptTask` bundles everything needed for one kind of completion: the
//! system prompt, the user prompt template and the completion options. The
//! defaults live in [`tasks`]; the server may override any of them.

pub mod tasks;

use crate::constants::{
    TASK_RESOURCE_SUGGESTIONS, TASK_SWING_FEEDBACK, TASK_SWING_LOG_FEEDBACK, TASK_TRAINING_PLAN,
};
use crate::providers::ai::CompletionOptions;
use tasks::*;

/// A fully resolved prompt configuration for a single task.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTask {
    pub system_prompt: String,
    pub user_prompt: String,
    pub options: CompletionOptions,
}

impl PromptTask {
    pub fn new(
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        options: CompletionOptions,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            options,
        }
    }

    /// Fills `{placeholder}` markers in the user prompt template.
    pub fn render_user_prompt(&self, values: &[(&str, &str)]) -> String {
        values
            .iter()
            .fold(self.user_prompt.clone(), |prompt, (key, value)| {
                prompt.replace(&format!("{{{key}}}"), value)
            })
    }

    /// Concise coaching feedback for a structured question submission.
    pub fn swing_feedback() -> Self {
        Self::new(
            SWING_FEEDBACK_SYSTEM_PROMPT,
            SWING_FEEDBACK_USER_PROMPT,
            CompletionOptions::new(0.7),
        )
    }

    /// The longer, step-by-step feedback returned by the swing log endpoint.
    pub fn swing_log_feedback() -> Self {
        Self::new(
            SWING_LOG_FEEDBACK_SYSTEM_PROMPT,
            SWING_LOG_FEEDBACK_USER_PROMPT,
            CompletionOptions::new(0.7).with_max_tokens(150),
        )
    }

    pub fn training_plan() -> Self {
        Self::new(
            TRAINING_PLAN_SYSTEM_PROMPT,
            TRAINING_PLAN_USER_PROMPT,
            CompletionOptions::new(0.7),
        )
    }

    /// Low temperature: the answer must be a raw JSON array.
    pub fn resource_suggestions() -> Self {
        Self::new(
            RESOURCE_SUGGESTIONS_SYSTEM_PROMPT,
            RESOURCE_SUGGESTIONS_USER_PROMPT,
            CompletionOptions::new(0.2),
        )
    }

    /// Returns the built-in default for a named task, if there is one.
    pub fn default_for(name: &str) -> Option<Self> {
        match name {
            TASK_SWING_FEEDBACK => Some(Self::swing_feedback()),
            TASK_SWING_LOG_FEEDBACK => Some(Self::swing_log_feedback()),
            TASK_TRAINING_PLAN => Some(Self::training_plan()),
            TASK_RESOURCE_SUGGESTIONS => Some(Self::resource_suggestions()),
            _ => None,
        }
    }
}

/// The names of all built-in tasks.
pub const DEFAULT_TASK_NAMES: [&str; 4] = [
    TASK_SWING_FEEDBACK,
    TASK_SWING_LOG_FEEDBACK,
    TASK_TRAINING_PLAN,
    TASK_RESOURCE_SUGGESTIONS,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_user_prompt_replaces_every_placeholder() {
        let task = PromptTask::training_plan();
        let prompt = task.render_user_prompt(&[
            ("years_played", "12"),
            ("handicap", "14.2"),
            ("strengths", "putting"),
            ("weaknesses", "driver"),
            ("goals", "break 80"),
        ]);
        assert!(prompt.contains("- Years played: 12"));
        assert!(prompt.contains("- Handicap: 14.2"));
        assert!(prompt.contains("- Goals: break 80"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_resource_template_keeps_json_braces() {
        let task = PromptTask::resource_suggestions();
        let prompt = task.render_user_prompt(&[("issue", "slice")]);
        assert!(prompt.contains("fix the issue: \"slice\""));
        assert!(prompt.contains("\"title\": \"Fixing a Slice with Driver\""));
    }

    #[test]
    fn test_every_default_task_name_resolves() {
        for name in DEFAULT_TASK_NAMES {
            assert!(PromptTask::default_for(name).is_some(), "missing {name}");
        }
        assert!(PromptTask::default_for("unknown").is_none());
    }
}
