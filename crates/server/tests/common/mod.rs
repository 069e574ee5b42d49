//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the
//! `swingsense-server` integration tests:
//!
//! - `TestApp`: spawns the real router on a random port, backed by a temporary
//!   SQLite file and an OpenAI-compatible provider pointed at an
//!   `httpmock::MockServer`.
//! - JWT helpers for minting tokens the server accepts (or rejects).

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::{Method, Mock, MockServer};
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::Client;
use serde_json::json;
use std::{
    fs::File,
    io::Write,
    net::SocketAddr,
    time::{SystemTime, UNIX_EPOCH},
};
use swingsense_server::{
    config, router,
    state::{build_app_state, build_app_state_with_provider, AppState},
};
use swingsense::AiProvider;
use tempfile::{tempdir, NamedTempFile, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

pub const TEST_JWT_SECRET: &str = "swingsense-test-secret";
pub const CHAT_PATH: &str = "/v1/chat/completions";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _db_file: NamedTempFile,
    _config_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server in verified auth mode.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with("verified", None).await
    }

    /// Spawns the server with the given `auth.mode` value.
    pub async fn spawn_with_auth_mode(auth_mode: &str) -> Result<Self> {
        Self::spawn_with(auth_mode, None).await
    }

    /// Spawns the server with an in-process AI provider instead of the HTTP mock.
    pub async fn spawn_with_provider(ai_provider: Box<dyn AiProvider>) -> Result<Self> {
        Self::spawn_with("verified", Some(ai_provider)).await
    }

    async fn spawn_with(auth_mode: &str, ai_provider: Option<Box<dyn AiProvider>>) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let db_file = NamedTempFile::new()?;
        let db_path = db_file.path().to_path_buf();

        let config_dir = tempdir()?;
        let config_path = config_dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
db_url: "{}"
allowed_origins: ["http://localhost:3000"]
auth:
  mode: "{auth_mode}"
  jwt_secret: "{TEST_JWT_SECRET}"
provider:
  api_url: "{}"
  api_key: "test-key"
  model_name: "mock-chat-model"
  timeout_secs: 5
  max_concurrent_requests: 4
"#,
            db_path.to_string_lossy(),
            mock_server.url(CHAT_PATH)
        );
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let config = config::get_config(Some(&config_path.to_string_lossy()))?;
        let app_state = match ai_provider {
            Some(provider) => build_app_state_with_provider(config, provider).await?,
            None => build_app_state(config).await?,
        };
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _db_file: db_file,
            _config_dir: config_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Mocks a chat completion whose request body contains `body_marker`.
    pub fn mock_completion(&self, body_marker: &str, content: &str) -> Mock<'_> {
        let body_marker = body_marker.to_string();
        let content = content.to_string();
        self.mock_server.mock(move |when, then| {
            when.method(Method::POST)
                .path(CHAT_PATH)
                .body_contains(body_marker);
            then.status(200).json_body(
                json!({"choices": [{"message": {"role": "assistant", "content": content}}]}),
            );
        })
    }

    /// Mocks a failing provider for every completion request.
    pub fn mock_completion_failure(&self, status: u16) -> Mock<'_> {
        self.mock_server.mock(|when, then| {
            when.method(Method::POST).path(CHAT_PATH);
            then.status(status).body("provider exploded");
        })
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn now_secs() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

/// Generates a valid JWT for a given subject.
pub fn generate_jwt(sub: &str) -> Result<String> {
    generate_jwt_with_secret(sub, TEST_JWT_SECRET)
}

/// Generates a JWT for `sub` signed with an arbitrary secret.
pub fn generate_jwt_with_secret(sub: &str, secret: &str) -> Result<String> {
    let claims = json!({
        "sub": sub,
        "email": format!("{sub}@example.com"),
        "exp": now_secs()? + 3600,
    });
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Generates a correctly signed JWT that expired an hour ago.
pub fn generate_expired_jwt(sub: &str) -> Result<String> {
    let claims = json!({ "sub": sub, "exp": now_secs()? - 3600 });
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )?)
}
