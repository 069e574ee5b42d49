use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use swingsense::errors::AiError;
use swingsense::providers::ai::{validate_request, AiProvider, CompletionOptions};
use swingsense::SqliteProvider;

// --- Test Setup ---

/// An isolated in-memory store with the schema applied.
pub struct TestSetup {
    pub provider: SqliteProvider,
}

impl TestSetup {
    pub async fn new() -> Result<Self> {
        let provider = SqliteProvider::new(":memory:").await?;
        provider.initialize_schema().await?;
        Ok(Self { provider })
    }
}

// --- Mock AI Provider ---

/// What the mock answers for a matching system prompt.
#[derive(Clone, Debug)]
pub enum MockReply {
    Text(String),
    Unavailable(String),
    Malformed(String),
}

/// A single recorded call to the mock.
#[derive(Clone, Debug, PartialEq)]
pub struct MockCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub options: CompletionOptions,
}

#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    replies: Arc<Mutex<Vec<(String, MockReply)>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-programs a reply. The key should be a unique substring of the
    /// system prompt; the first matching key wins.
    pub fn add_reply(&self, key: &str, reply: MockReply) {
        self.replies
            .lock()
            .unwrap()
            .push((key.to_string(), reply));
    }

    /// Shorthand for a successful text reply.
    pub fn add_response(&self, key: &str, response: &str) {
        self.add_reply(key, MockReply::Text(response.to_string()));
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, AiError> {
        validate_request(system_prompt, user_prompt, options)?;

        self.calls.lock().unwrap().push(MockCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            options: options.clone(),
        });

        let replies = self.replies.lock().unwrap();
        let reply = replies
            .iter()
            .find(|(key, _)| system_prompt.contains(key.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(MockReply::Text(text)) => Ok(text.trim().to_string()),
            Some(MockReply::Unavailable(msg)) => Err(AiError::UpstreamUnavailable(msg)),
            Some(MockReply::Malformed(msg)) => Err(AiError::UpstreamMalformed(msg)),
            None => Err(AiError::UpstreamUnavailable(format!(
                "MockAiProvider: No response programmed for system prompt. Got: '{system_prompt}'"
            ))),
        }
    }
}
