//! # Application Configuration
//!
//! This module defines the configuration structure for the `swingsense-server`
//! and loads it in layers:
//!
//! 1. Programmatic defaults, including the default task prompts from the library.
//! 2. An optional `config.yml` (or an explicit path) with `${VAR}` substitution.
//! 3. Unprefixed environment variables for top-level keys (`PORT`, `DB_URL`).
//! 4. `SWINGSENSE_`-prefixed variables for nested keys
//!    (e.g. `SWINGSENSE_PROVIDER__MODEL_NAME`).

use config::{
    Config as ConfigBuilder, Environment, File, FileFormat, Value as ConfigValue,
    ValueKind as ConfigValueKind,
};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use swingsense::constants::DEFAULT_DB_FILE;
use swingsense::prompts::{PromptTask, DEFAULT_TASK_NAMES};
use tracing::info;

/// The config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The path to the SQLite database file. Loaded from `DB_URL` env var.
    #[serde(default = "default_db_url")]
    pub db_url: String,
    /// Origins allowed by CORS. Accepts a list or a comma-separated string.
    #[serde(
        default = "default_allowed_origins",
        deserialize_with = "deserialize_origins"
    )]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    /// A map of tasks, each holding prompts and completion options.
    #[serde(default)]
    pub tasks: HashMap<String, TaskConfig>,
}

fn default_port() -> u16 {
    8000
}

fn default_db_url() -> String {
    DEFAULT_DB_FILE.to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<String>),
        One(String),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(list) => list,
        OneOrMany::One(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// How bearer tokens are checked.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthModeConfig {
    #[default]
    Verified,
    InsecureDev,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthModeConfig,
    /// HS256 secret. Falls back to the `JWT_SECRET` env var.
    #[serde(default)]
    pub jwt_secret: Option<String>,
}

/// The OpenAI-compatible completion provider.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Falls back to the `OPENAI_API_KEY` env var.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model_name() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_concurrent_requests() -> usize {
    8
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            model_name: default_model_name(),
            timeout_secs: default_timeout_secs(),
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

/// Prompts and completion options for a named task. Unset fields fall back
/// to the library defaults for that task.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TaskConfig {
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub user_prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// Constructs a `config::Value` map of the default tasks from the library.
/// This serves as the base layer of configuration.
fn build_default_tasks() -> HashMap<String, ConfigValue> {
    DEFAULT_TASK_NAMES
        .iter()
        .filter_map(|name| PromptTask::default_for(name).map(|task| (*name, task)))
        .map(|(name, task)| {
            let mut table = HashMap::new();
            table.insert(
                "system_prompt".to_string(),
                ConfigValue::from(task.system_prompt),
            );
            table.insert(
                "user_prompt".to_string(),
                ConfigValue::from(task.user_prompt),
            );
            table.insert(
                "temperature".to_string(),
                ConfigValue::from(f64::from(task.options.temperature)),
            );
            if let Some(max_tokens) = task.options.max_tokens {
                table.insert(
                    "max_tokens".to_string(),
                    ConfigValue::from(i64::from(max_tokens)),
                );
            }
            (
                name.to_string(),
                ConfigValue::new(None, ConfigValueKind::Table(table)),
            )
        })
        .collect()
}

/// Replaces every `${VAR}` with the value of the environment variable, or
/// with an empty string when it is unset.
pub fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded = re.replace_all(content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });
    Ok(expanded.to_string())
}

// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    substitute_env_vars(&content).map(Some)
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Loads the application configuration from a file and environment variables.
///
/// With an explicit path the file must exist. Without one, `config.yml` in
/// the working directory is used if present and the defaults otherwise.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults from the library.
        .set_default("tasks", build_default_tasks())?;

    // Layer 2: Main config file.
    match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => match read_and_substitute(DEFAULT_CONFIG_FILE)? {
            Some(content) => {
                info!("Loading configuration from '{DEFAULT_CONFIG_FILE}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            }
            None => info!("No '{DEFAULT_CONFIG_FILE}' found. Using defaults."),
        },
    }

    let settings = builder
        // Layer 3: Environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 4: Prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("SWINGSENSE")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // Well-known variables fill secrets that no layer has set.
    if config.provider.api_key.as_deref().is_none_or(str::is_empty) {
        config.provider.api_key = non_empty_env("OPENAI_API_KEY");
    }
    if config.auth.jwt_secret.as_deref().is_none_or(str::is_empty) {
        config.auth.jwt_secret = non_empty_env("JWT_SECRET");
    }

    Ok(config)
}
