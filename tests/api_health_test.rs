//! Tests for the health endpoints.

mod common;

use common::TestApp;
use ditherboy::api::HealthResponse;

#[tokio::test]
async fn test_api_health() {
    let app = TestApp::new();

    let response = app.get("/api/health").await;

    common::assert_ok(&response);
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.service, "DitherBoy");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_plain_health() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    common::assert_ok(&response);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/api/nope").await;

    common::assert_status(&response, axum::http::StatusCode::NOT_FOUND);
}
