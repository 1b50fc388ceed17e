mod common;

use chrono::Duration as ChronoDuration;
use common::ADMIN_KEY;
use serde_json::Value;

#[tokio::test]
async fn test_url_info_success() {
    let app = common::spawn_app();
    common::insert_valid(app.repository.as_ref(), "https://example.com/info", "info0001").await;

    let response = app
        .server
        .get("/api/urls/info0001")
        .add_header("x-api-key", ADMIN_KEY)
        .await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["short_token"], "info0001");
    assert_eq!(body["original_url"], "https://example.com/info");
    assert_eq!(body["click_count"], 0);
    assert_eq!(body["expired"], false);
    assert!(body["created_at"].is_string());
    assert!(body["valid_until"].is_string());
}

#[tokio::test]
async fn test_url_info_reports_expired_record() {
    let app = common::spawn_app();
    common::insert_expired(
        app.repository.as_ref(),
        "https://example.com/stale",
        "stale001",
        ChronoDuration::minutes(5),
    )
    .await;

    let response = app
        .server
        .get("/api/urls/stale001")
        .add_header("x-api-key", ADMIN_KEY)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["expired"], true);
}

#[tokio::test]
async fn test_url_info_does_not_count_clicks() {
    let app = common::spawn_app();
    common::insert_valid(app.repository.as_ref(), "https://example.com/quiet", "quiet001").await;

    for _ in 0..2 {
        app.server
            .get("/api/urls/quiet001")
            .add_header("x-api-key", ADMIN_KEY)
            .await;
    }

    let body: Value = app
        .server
        .get("/api/urls/quiet001")
        .add_header("x-api-key", ADMIN_KEY)
        .await
        .json();
    assert_eq!(body["click_count"], 0);
    assert!(app.cache.is_empty().await);
}

#[tokio::test]
async fn test_url_info_not_found() {
    let app = common::spawn_app();

    let response = app
        .server
        .get("/api/urls/missing1")
        .add_header("x-api-key", ADMIN_KEY)
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_url_info_requires_api_key() {
    let app = common::spawn_app();
    common::insert_valid(app.repository.as_ref(), "https://example.com/secret", "secret01").await;

    let response = app.server.get("/api/urls/secret01").await;
    assert_eq!(response.status_code(), 401);
    assert!(response.headers().contains_key("www-authenticate"));

    let response = app
        .server
        .get("/api/urls/secret01")
        .add_header("x-api-key", "wrong-key")
        .await;
    assert_eq!(response.status_code(), 401);
    assert_eq!(app.repository.calls(), 1);
}
