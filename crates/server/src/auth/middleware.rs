//! # Authentication Extractors
//!
//! Axum extractors that resolve the `Authorization: Bearer <token>` header to
//! an identity through the shared `Authenticator`.
//!
//! - [`CurrentIdentity`]: never rejects a missing token; an invalid token is a `401`.
//! - [`VerifiedUser`]: additionally requires a verified identity.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use core_access::{Claims, Identity};
use tracing::{debug, warn};

use crate::{errors::AppError, state::AppState};

/// The caller's identity, which may be unauthenticated.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

/// The claims of a caller holding a verified token.
#[derive(Debug, Clone)]
pub struct VerifiedUser(pub Claims);

impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer_header =
            Option::<TypedHeader<Authorization<Bearer>>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    warn!("Malformed Authorization header: {}", e);
                    AppError::Unauthorized("Invalid Authorization header format.".to_string())
                })?;

        let token = bearer_header
            .as_ref()
            .map(|TypedHeader(Authorization(bearer))| bearer.token());
        debug!(has_token = token.is_some(), "Resolving caller identity");

        let identity = state.authenticator.identify(token)?;
        Ok(CurrentIdentity(identity))
    }
}

impl FromRequestParts<AppState> for VerifiedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match CurrentIdentity::from_request_parts(parts, state).await?.0 {
            Identity::Verified(claims) => Ok(VerifiedUser(claims)),
            Identity::Unauthenticated => Err(AppError::Unauthorized(
                "Authentication required.".to_string(),
            )),
        }
    }
}
