use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_access::AccessError;
use serde_json::json;
use swingsense::{AiError, CoachError};
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors originating from the `swingsense` library.
    Coach(CoachError),
    /// The request is malformed (bad query string, missing parameter).
    BadRequest(String),
    /// The request body is well-formed JSON of the wrong shape.
    Unprocessable(String),
    Unauthorized(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<CoachError> for AppError {
    fn from(err: CoachError) -> Self {
        AppError::Coach(err)
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        AppError::Unauthorized(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::Unprocessable(e.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Upstream failures map to 502, except a misconfigured request which is ours.
fn upstream_response(err: &AiError, context: &str) -> (StatusCode, String) {
    match err {
        AiError::InvalidOptions(_) | AiError::ReqwestClientBuild(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server is not configured correctly.".to_string(),
        ),
        other => (StatusCode::BAD_GATEWAY, format!("{context}: {other}")),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            AppError::Coach(err) => match err {
                CoachError::InvalidInput { field, message } => {
                    warn!("Rejected invalid {field}: {message}");
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        json!({ "error": format!("Invalid {field}: {message}"), "field": field }),
                    )
                }
                CoachError::FeedbackGenerationFailed(e) => {
                    error!("Feedback generation failed: {e:?}");
                    let (status, msg) = upstream_response(&e, "Failed to generate feedback");
                    (status, json!({ "error": msg }))
                }
                CoachError::Upstream(e) => {
                    error!("AI provider error: {e:?}");
                    let (status, msg) = upstream_response(&e, "AI provider error");
                    (status, json!({ "error": msg }))
                }
                CoachError::Storage(e) => {
                    error!("Storage error: {e:?}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "An internal server error occurred." }),
                    )
                }
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Unprocessable(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": msg }))
            }
            AppError::Unauthorized(msg) => {
                warn!("Unauthorized request: {msg}");
                (StatusCode::UNAUTHORIZED, json!({ "error": msg }))
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal server error occurred." }),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}
