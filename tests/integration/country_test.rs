//! Integration tests for the country reference endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_list_countries() {
    let app = TestApp::new();
    let response = app.get("/api/countries", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"].as_array().unwrap().len() > 200);
}

#[tokio::test]
async fn test_get_country() {
    let app = TestApp::new();
    let response = app.get("/api/countries/de", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["code"], "DE");
    assert_eq!(response.body["data"]["flag"], "🇩🇪");
}

#[tokio::test]
async fn test_unknown_country() {
    let app = TestApp::new();
    let response = app.get("/api/countries/zz", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}
