pub mod openai;

use crate::errors::AiError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Per-call settings for a chat completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Overrides the provider's default model when set.
    #[serde(default)]
    pub model: Option<String>,
    pub temperature: f32,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl CompletionOptions {
    pub fn new(temperature: f32) -> Self {
        Self {
            model: None,
            temperature,
            max_tokens: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self::new(0.7)
    }
}

/// Checks the provider contract before any network traffic happens.
pub fn validate_request(
    system_prompt: &str,
    user_prompt: &str,
    options: &CompletionOptions,
) -> Result<(), AiError> {
    if system_prompt.trim().is_empty() {
        return Err(AiError::InvalidOptions("system prompt is empty".to_string()));
    }
    if user_prompt.trim().is_empty() {
        return Err(AiError::InvalidOptions("user prompt is empty".to_string()));
    }
    if !(0.0..=2.0).contains(&options.temperature) {
        return Err(AiError::InvalidOptions(format!(
            "temperature {} is outside [0, 2]",
            options.temperature
        )));
    }
    if options.max_tokens == Some(0) {
        return Err(AiError::InvalidOptions(
            "max_tokens must be positive".to_string(),
        ));
    }
    Ok(())
}

/// A trait for interacting with a chat-completion provider.
///
/// Implementations make a single attempt per call and return the trimmed
/// text of the first choice.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, AiError>;
}

dyn_clone::clone_trait_object!(AiProvider);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_request_accepts_boundaries() {
        assert!(validate_request("sys", "user", &CompletionOptions::new(0.0)).is_ok());
        assert!(validate_request("sys", "user", &CompletionOptions::new(2.0)).is_ok());
        assert!(
            validate_request("sys", "user", &CompletionOptions::new(0.7).with_max_tokens(1))
                .is_ok()
        );
    }

    #[test]
    fn test_validate_request_rejects_bad_input() {
        let opts = CompletionOptions::default();
        assert!(matches!(
            validate_request("  ", "user", &opts),
            Err(AiError::InvalidOptions(_))
        ));
        assert!(matches!(
            validate_request("sys", "", &opts),
            Err(AiError::InvalidOptions(_))
        ));
        assert!(matches!(
            validate_request("sys", "user", &CompletionOptions::new(2.5)),
            Err(AiError::InvalidOptions(_))
        ));
        assert!(matches!(
            validate_request("sys", "user", &CompletionOptions::new(f32::NAN)),
            Err(AiError::InvalidOptions(_))
        ));
        assert!(matches!(
            validate_request("sys", "user", &opts.clone().with_max_tokens(0)),
            Err(AiError::InvalidOptions(_))
        ));
    }
}
