//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The `AppState` holds all shared resources, such
//! as the configuration, the database provider, the AI provider client and the
//! authenticator, making them accessible to all request handlers.

use crate::{
    config::{AppConfig, AuthModeConfig},
    errors::AppError,
};
use core_access::{AuthMode, Authenticator};
use std::{collections::HashMap, sync::Arc, time::Duration};
use swingsense::{
    prompts::PromptTask,
    providers::ai::{
        openai::{OpenAiProvider, OpenAiSettings},
        validate_request,
    },
    AiProvider, CompletionOptions, SqliteProvider,
};
use tracing::{info, warn};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// Fully resolved tasks, keyed by task name.
    pub tasks: Arc<HashMap<String, PromptTask>>,
    pub sqlite_provider: Arc<SqliteProvider>,
    pub ai_provider: Arc<Box<dyn AiProvider>>,
    pub authenticator: Arc<Authenticator>,
}

impl AppState {
    /// Looks up a resolved task by name.
    pub fn task(&self, name: &str) -> Result<&PromptTask, AppError> {
        self.tasks
            .get(name)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Task '{name}' is not configured")))
    }
}

/// Merges each configured task over the library default of the same name.
/// Fails on empty prompts or out-of-range options so a bad config stops startup.
pub fn resolve_tasks(config: &AppConfig) -> anyhow::Result<HashMap<String, PromptTask>> {
    let mut resolved = HashMap::new();
    for (name, task_config) in &config.tasks {
        let fallback = PromptTask::default_for(name);
        let system_prompt = task_config
            .system_prompt
            .clone()
            .or_else(|| fallback.as_ref().map(|t| t.system_prompt.clone()))
            .ok_or_else(|| {
                anyhow::anyhow!("Task '{name}' is missing required 'system_prompt' field")
            })?;
        let user_prompt = task_config
            .user_prompt
            .clone()
            .or_else(|| fallback.as_ref().map(|t| t.user_prompt.clone()))
            .ok_or_else(|| {
                anyhow::anyhow!("Task '{name}' is missing required 'user_prompt' field")
            })?;
        let default_options = fallback.map(|t| t.options).unwrap_or_default();

        let options = CompletionOptions {
            model: task_config.model.clone().or(default_options.model),
            temperature: task_config
                .temperature
                .unwrap_or(default_options.temperature),
            max_tokens: task_config.max_tokens.or(default_options.max_tokens),
        };
        validate_request(&system_prompt, &user_prompt, &options)
            .map_err(|e| anyhow::anyhow!("Task '{name}' is misconfigured: {e}"))?;
        resolved.insert(
            name.clone(),
            PromptTask::new(system_prompt, user_prompt, options),
        );
    }
    Ok(resolved)
}

/// Builds the authenticator. Verified mode needs a secret.
pub fn build_authenticator(config: &AppConfig) -> anyhow::Result<Authenticator> {
    let mode = match config.auth.mode {
        AuthModeConfig::Verified => {
            let secret = config
                .auth
                .jwt_secret
                .clone()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "auth.jwt_secret (or JWT_SECRET) is required unless auth.mode is 'insecure_dev'"
                    )
                })?;
            AuthMode::Verified { secret }
        }
        AuthModeConfig::InsecureDev => AuthMode::InsecureDev,
    };
    Ok(Authenticator::new(mode))
}

/// Builds the OpenAI-compatible provider described by the configuration.
pub fn build_ai_provider(config: &AppConfig) -> anyhow::Result<Box<dyn AiProvider>> {
    let provider = &config.provider;
    if provider.api_key.is_none() {
        warn!("No provider API key configured (provider.api_key / OPENAI_API_KEY).");
    }
    let client = OpenAiProvider::new(OpenAiSettings {
        api_url: provider.api_url.clone(),
        api_key: provider.api_key.clone(),
        default_model: provider.model_name.clone(),
        timeout: Duration::from_secs(provider.timeout_secs),
        max_concurrent_requests: provider.max_concurrent_requests,
    })?;
    Ok(Box::new(client))
}

/// Builds the shared application state from the configuration.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let ai_provider = build_ai_provider(&config)?;
    build_app_state_with_provider(config, ai_provider).await
}

/// Like [`build_app_state`], with the AI provider supplied by the caller.
pub async fn build_app_state_with_provider(
    config: AppConfig,
    ai_provider: Box<dyn AiProvider>,
) -> anyhow::Result<AppState> {
    let tasks = resolve_tasks(&config)?;
    let authenticator = build_authenticator(&config)?;

    if let Some(parent) = std::path::Path::new(&config.db_url).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let sqlite_provider = SqliteProvider::new(&config.db_url).await?;
    info!(db_path = %config.db_url, "Initialized local storage provider (SQLite).");
    // Ensure the database schema is up-to-date on startup.
    sqlite_provider.initialize_schema().await?;

    Ok(AppState {
        config: Arc::new(config),
        tasks: Arc::new(tasks),
        sqlite_provider: Arc::new(sqlite_provider),
        ai_provider: Arc::new(ai_provider),
        authenticator: Arc::new(authenticator),
    })
}
