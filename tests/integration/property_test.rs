//! Integration tests for listing endpoints.

use http::StatusCode;

use crate::helpers::{TestApp, listing_fields, multipart_of};

#[tokio::test]
async fn test_create_and_fetch_property() {
    let app = TestApp::new();
    let session = app.harness.signed_up("host_1").await;

    let body = multipart_of(&listing_fields("Lake Cabin", "cabins"))
        .file("image", "cabin.jpg", "image/jpeg", &[0xFF, 0xD8, 0xFF]);
    let response = app
        .submit_multipart("POST", "/api/properties", body, Some(&session))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["redirect_to"], "/");

    let listing = app.get("/api/properties", None).await;
    let items = listing.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    let id = items[0]["id"].as_str().unwrap();

    let details = app.get(&format!("/api/properties/{id}"), None).await;
    assert_eq!(details.status, StatusCode::OK);
    assert_eq!(details.body["data"]["name"], "Lake Cabin");
    assert_eq!(details.body["data"]["profileId"], "host_1");
    assert_eq!(details.body["data"]["bedrooms"], 2);
    assert_eq!(
        details.body["data"]["image"].as_str(),
        app.harness.storage.last_public_url().as_deref()
    );
}

#[tokio::test]
async fn test_create_property_without_image() {
    let app = TestApp::new();
    let session = app.harness.signed_up("host_1").await;

    let response = app
        .submit_multipart(
            "POST",
            "/api/properties",
            multipart_of(&listing_fields("Lake Cabin", "cabins")),
            Some(&session),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "image");
    assert_eq!(app.harness.storage.uploads(), 0);
}

#[tokio::test]
async fn test_oversized_image_is_rejected_before_upload() {
    let app = TestApp::new();
    let session = app.harness.signed_up("host_1").await;

    let body = multipart_of(&listing_fields("Lake Cabin", "cabins")).file(
        "image",
        "huge.jpg",
        "image/jpeg",
        &vec![0u8; 1024 * 1024 + 1],
    );
    let response = app
        .submit_multipart("POST", "/api/properties", body, Some(&session))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "image.size");
    assert_eq!(app.harness.storage.uploads(), 0);
    assert!(app.harness.properties.is_empty());
}

#[tokio::test]
async fn test_search_and_category_filter() {
    let app = TestApp::new();
    app.harness.seed_property("Old Cabin", "cabins");
    app.harness.seed_property("Lake Tent", "tents");
    app.harness.seed_property("New Cabin", "cabins");

    let all = app.get("/api/properties?search=", None).await;
    let names: Vec<_> = all.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["New Cabin", "Lake Tent", "Old Cabin"]);

    let cabins = app.get("/api/properties?category=cabins", None).await;
    assert_eq!(cabins.body["data"].as_array().unwrap().len(), 2);

    let lake = app.get("/api/properties?search=LAKE", None).await;
    assert_eq!(lake.body["data"].as_array().unwrap().len(), 1);

    let blank = app.get("/api/properties?search=&category=", None).await;
    assert_eq!(blank.status, StatusCode::OK);
    assert!(blank.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_property_is_not_found() {
    let app = TestApp::new();
    let response = app
        .get("/api/properties/0190d2c4-0000-7000-8000-000000000000", None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
