use crate::{auth::middleware::VerifiedUser, types::MeResponse};
use axum::Json;

/// Returns the identity carried by the caller's token.
pub async fn me_handler(VerifiedUser(claims): VerifiedUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: claims.sub,
        email: claims.email,
    })
}
