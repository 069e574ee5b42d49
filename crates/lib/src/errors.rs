use thiserror::Error;

/// Errors raised by a completion provider.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    /// The caller asked for something the provider contract forbids
    /// (empty prompt, temperature outside `[0, 2]`, zero `max_tokens`).
    #[error("Invalid completion options: {0}")]
    InvalidOptions(String),
    /// The network call failed, timed out, or the provider answered with a
    /// non-success status.
    #[error("AI provider unavailable: {0}")]
    UpstreamUnavailable(String),
    /// The provider answered, but not in the expected shape.
    #[error("AI provider returned a malformed response: {0}")]
    UpstreamMalformed(String),
}

/// Errors raised by the persistence store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] turso::Error),
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The error type returned by every coaching operation.
#[derive(Error, Debug)]
pub enum CoachError {
    /// Client-supplied data violates a stated constraint.
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },
    /// Feedback for a submitted question could not be generated. Nothing was persisted.
    #[error("Feedback generation failed: {0}")]
    FeedbackGenerationFailed(#[source] AiError),
    #[error(transparent)]
    Upstream(#[from] AiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CoachError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        CoachError::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

impl From<turso::Error> for CoachError {
    fn from(err: turso::Error) -> Self {
        CoachError::Storage(StorageError::Database(err))
    }
}
