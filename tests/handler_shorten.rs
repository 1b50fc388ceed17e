mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_shorten_success() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let token = body["short_token"].as_str().unwrap();
    assert_eq!(token.len(), 8);
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn test_shorten_same_url_twice_returns_same_token() {
    let app = common::spawn_app();
    let payload = json!({ "url": "https://example.com/twice" });

    let first: Value = app.server.post("/api/shorten").json(&payload).await.json();
    let second: Value = app.server.post("/api/shorten").json(&payload).await.json();

    assert_eq!(first["short_token"], second["short_token"]);
    assert_eq!(app.repository.inner.len().await, 1);
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({ "url": "" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(app.repository.calls(), 0);
}

#[tokio::test]
async fn test_shorten_missing_url() {
    let app = common::spawn_app();

    let response = app.server.post("/api/shorten").json(&json!({})).await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_shorten_malformed_body() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .content_type("application/json")
        .text("{not json")
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_store_failure_is_opaque() {
    let app = common::spawn_app();
    app.repository.set_failing(true);

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/down" }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "internal_error");
    assert_eq!(body["error"]["details"], json!({}));
}
