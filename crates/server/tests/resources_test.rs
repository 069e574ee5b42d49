//! # Resource Suggestion Endpoint Tests

mod common;

use anyhow::Result;
use common::{generate_jwt, TestApp};
use serde_json::{json, Value};

const RESOURCES_MARKER: &str = "ONLY responds in raw JSON";

fn three_resources() -> String {
    json!([
        { "id": 1, "title": "Fixing a Slice", "description": "Grip and path drills.", "url": "https://example.com/slice" },
        { "id": 2, "title": "Gate Drill", "description": "Square the face.", "url": "https://example.com/gate" },
        { "id": 3, "title": "Path Basics", "description": "In-to-out swing path.", "url": "https://example.com/path" }
    ])
    .to_string()
}

#[tokio::test]
async fn test_resources_are_returned_with_filter_and_user() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let ai_mock = app.mock_completion(RESOURCES_MARKER, &three_resources());
    let token = generate_jwt("golfer-3")?;

    // Act
    let response = app
        .client
        .get(app.url("/resources?issue=slice"))
        .bearer_auth(&token)
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["filter"], "slice");
    assert_eq!(body["user_id"], "golfer-3");
    assert_eq!(body["resources"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["resources"][0]["title"], "Fixing a Slice");
    ai_mock.assert_hits(1);

    Ok(())
}

#[tokio::test]
async fn test_anonymous_caller_gets_null_user() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let _ai_mock = app.mock_completion(RESOURCES_MARKER, &three_resources());

    // Act
    let body: Value = app
        .client
        .get(app.url("/resources/?issue=hook"))
        .send()
        .await?
        .json()
        .await?;

    // Assert
    assert_eq!(body["filter"], "hook");
    assert!(body["user_id"].is_null());

    Ok(())
}

#[tokio::test]
async fn test_missing_issue_is_bad_request() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let ai_mock = app.mock_completion(RESOURCES_MARKER, &three_resources());

    // Act
    let missing = app.client.get(app.url("/resources")).send().await?;
    let blank = app
        .client
        .get(app.url("/resources?issue=%20%20"))
        .send()
        .await?;

    // Assert
    assert_eq!(missing.status(), 400);
    assert_eq!(blank.status(), 400);
    ai_mock.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_non_json_answer_is_bad_gateway_with_snippet() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let _ai_mock = app.mock_completion(RESOURCES_MARKER, "Sure! Here are some resources...");

    // Act
    let response = app
        .client
        .get(app.url("/resources?issue=slice"))
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), 502);
    let body: Value = response.json().await?;
    let error = body["error"].as_str().unwrap_or_default();
    assert!(error.contains("Invalid JSON returned by AI: Sure! Here are some resources..."));

    Ok(())
}
