//! # Authentication Tests
//!
//! Bearer token handling on `/me` and on endpoints where a token is optional.

mod common;

use anyhow::Result;
use common::{generate_expired_jwt, generate_jwt, generate_jwt_with_secret, TestApp};
use serde_json::{json, Value};

#[tokio::test]
async fn test_me_returns_token_identity() -> Result<()> {
    // 1. Arrange
    let app = TestApp::spawn().await?;
    let token = generate_jwt("golfer-42")?;

    // 2. Act
    let response = app
        .client
        .get(app.url("/me"))
        .bearer_auth(&token)
        .send()
        .await?;

    // 3. Assert
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(
        body,
        json!({ "user_id": "golfer-42", "email": "golfer-42@example.com" })
    );

    Ok(())
}

#[tokio::test]
async fn test_me_rejects_missing_forged_and_expired_tokens() -> Result<()> {
    // 1. Arrange
    let app = TestApp::spawn().await?;
    let forged = generate_jwt_with_secret("golfer-42", "not-the-server-secret")?;
    let expired = generate_expired_jwt("golfer-42")?;

    // 2. Act
    let missing = app.client.get(app.url("/me/")).send().await?;
    let forged = app
        .client
        .get(app.url("/me"))
        .bearer_auth(&forged)
        .send()
        .await?;
    let expired = app
        .client
        .get(app.url("/me"))
        .bearer_auth(&expired)
        .send()
        .await?;
    let garbage = app
        .client
        .get(app.url("/me"))
        .bearer_auth("not.a.jwt")
        .send()
        .await?;

    // 3. Assert
    assert_eq!(missing.status(), 401);
    assert_eq!(forged.status(), 401);
    assert_eq!(expired.status(), 401);
    assert_eq!(garbage.status(), 401);
    let body: Value = garbage.json().await?;
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_invalid_token_on_optional_endpoint_is_unauthorized() -> Result<()> {
    // 1. Arrange
    let app = TestApp::spawn().await?;
    let ai_mock = app.mock_completion("concise, actionable advice", "unused");

    // 2. Act
    let bad_token = app
        .client
        .post(app.url("/questions/"))
        .bearer_auth("not.a.jwt")
        .json(&json!({ "question": "Why do I chunk chips?" }))
        .send()
        .await?;
    let wrong_scheme = app
        .client
        .post(app.url("/questions/"))
        .header("Authorization", "Basic Zm9vOmJhcg==")
        .json(&json!({ "question": "Why do I chunk chips?" }))
        .send()
        .await?;

    // 3. Assert
    assert_eq!(bad_token.status(), 401);
    assert_eq!(wrong_scheme.status(), 401);
    ai_mock.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_insecure_dev_mode_accepts_unsigned_subjects() -> Result<()> {
    // 1. Arrange
    let app = TestApp::spawn_with_auth_mode("insecure_dev").await?;
    let token = generate_jwt_with_secret("dev-user", "any-secret-at-all")?;

    // 2. Act
    let response = app
        .client
        .get(app.url("/me"))
        .bearer_auth(&token)
        .send()
        .await?;

    // 3. Assert
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["user_id"], "dev-user");

    Ok(())
}
