use crate::{
    constants::MALFORMED_SNIPPET_CHARS,
    errors::AiError,
    providers::ai::{validate_request, AiProvider, CompletionOptions},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, sync::Arc, time::Duration};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Deserialize, Debug)]
struct ChatResponseMessage {
    content: Option<String>,
}

// --- Provider implementation ---

/// Settings for an [`OpenAiProvider`].
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    /// The full chat-completions URL, e.g. `https://api.openai.com/v1/chat/completions`.
    pub api_url: String,
    pub api_key: Option<String>,
    /// Used when a call does not name a model.
    pub default_model: String,
    pub timeout: Duration,
    /// Upper bound on in-flight requests to the provider.
    pub max_concurrent_requests: usize,
}

/// A provider for any OpenAI-compatible chat-completions API.
#[derive(Clone, Debug)]
pub struct OpenAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    default_model: String,
    permits: Arc<Semaphore>,
}

impl OpenAiProvider {
    /// Creates a new `OpenAiProvider`.
    pub fn new(settings: OpenAiSettings) -> Result<Self, AiError> {
        let client = ReqwestClient::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(AiError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url: settings.api_url,
            api_key: settings.api_key,
            default_model: settings.default_model,
            permits: Arc::new(Semaphore::new(settings.max_concurrent_requests.max(1))),
        })
    }
}

fn snippet(text: &str) -> String {
    text.chars().take(MALFORMED_SNIPPET_CHARS).collect()
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, AiError> {
        validate_request(system_prompt, user_prompt, options)?;

        let model = options.model.as_deref().unwrap_or(&self.default_model);
        let request_body = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stream: false,
        };

        // Fails only if the semaphore is closed.
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| AiError::UpstreamUnavailable(format!("request limiter closed: {e}")))?;

        debug!(model = %model, api_url = %self.api_url, "--> Sending chat completion request");

        let mut request_builder = self.client.post(&self.api_url);
        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                warn!("Chat completion request failed: {e}");
                AiError::UpstreamUnavailable(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AiError::UpstreamUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(AiError::UpstreamUnavailable(format!(
                "provider returned {status}: {}",
                snippet(&body)
            )));
        }

        let chat_response: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            AiError::UpstreamMalformed(format!("{e}; body: {}", snippet(&body)))
        })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AiError::UpstreamMalformed("response has no choices".to_string()))?
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| {
                AiError::UpstreamMalformed("first choice has no message content".to_string())
            })?;

        let text = content.trim();
        if text.is_empty() {
            return Err(AiError::UpstreamMalformed(
                "first choice has empty message content".to_string(),
            ));
        }

        Ok(text.to_string())
    }
}
