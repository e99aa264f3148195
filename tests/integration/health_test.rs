//! Integration tests for health endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.get("/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_detailed_health_without_database() {
    let app = TestApp::new();
    let response = app.get("/api/health/detailed", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["database"], "not configured");
    assert_eq!(response.body["data"]["storage"], "available");
    assert_eq!(response.body["data"]["storage_provider"], "memory");
}
