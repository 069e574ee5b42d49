//! # Core Access Crate
//!
//! Identity for the `swingsense` application. An [`Authenticator`] turns an
//! optional bearer token into an [`Identity`]. Tokens are HS256 JWTs.
//!
//! The authenticator is constructed once at startup from configuration and
//! passed around as a capability; nothing here reads the environment.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),
    #[error("Token has no subject claim")]
    MissingSubject,
}

/// The claims carried by a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// What a token looks like before the subject has been checked.
#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    exp: Option<u64>,
}

/// Who is making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Unauthenticated,
    Verified(Claims),
}

impl Identity {
    /// The subject of a verified identity.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Identity::Verified(claims) => Some(&claims.sub),
            Identity::Unauthenticated => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Identity::Verified(claims) => claims.email.as_deref(),
            Identity::Unauthenticated => None,
        }
    }
}

/// How tokens are checked.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Signature (HS256) and expiry are validated.
    Verified { secret: String },
    /// Claims are decoded without any signature or expiry check.
    /// Local development only.
    InsecureDev,
}

impl std::fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMode::Verified { .. } => f
                .debug_struct("Verified")
                .field("secret", &"<redacted>")
                .finish(),
            AuthMode::InsecureDev => f.write_str("InsecureDev"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Authenticator {
    mode: AuthMode,
}

impl Authenticator {
    pub fn new(mode: AuthMode) -> Self {
        if mode == AuthMode::InsecureDev {
            warn!("Authenticator running in INSECURE dev mode: token signatures are NOT verified.");
        }
        Self { mode }
    }

    pub fn mode(&self) -> &AuthMode {
        &self.mode
    }

    /// Resolves a bearer token (without the `Bearer ` prefix) to an identity.
    pub fn identify(&self, bearer_token: Option<&str>) -> Result<Identity, AccessError> {
        let Some(token) = bearer_token else {
            return Ok(Identity::Unauthenticated);
        };

        let raw = match &self.mode {
            AuthMode::Verified { secret } => {
                let mut validation = Validation::new(Algorithm::HS256);
                validation.validate_aud = false;
                decode::<RawClaims>(
                    token,
                    &DecodingKey::from_secret(secret.as_bytes()),
                    &validation,
                )
                .map_err(|e| {
                    debug!("JWT validation failed: {e}");
                    AccessError::InvalidToken(e.to_string())
                })?
                .claims
            }
            AuthMode::InsecureDev => {
                let mut validation = Validation::new(Algorithm::HS256);
                validation.insecure_disable_signature_validation();
                validation.validate_exp = false;
                validation.validate_aud = false;
                validation.required_spec_claims.clear();
                let claims = decode::<RawClaims>(token, &DecodingKey::from_secret(&[]), &validation)
                    .map_err(|e| AccessError::InvalidToken(e.to_string()))?
                    .claims;
                warn!(
                    sub = ?claims.sub,
                    "Accepted token WITHOUT signature verification (insecure dev mode)"
                );
                claims
            }
        };

        let sub = raw
            .sub
            .filter(|s| !s.trim().is_empty())
            .ok_or(AccessError::MissingSubject)?;

        Ok(Identity::Verified(Claims {
            sub,
            email: raw.email,
            exp: raw.exp,
        }))
    }
}
