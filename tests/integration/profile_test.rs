//! Integration tests for profile endpoints.

use http::StatusCode;

use crate::helpers::{MultipartBody, TestApp};

const PROFILE: &[(&str, &str)] = &[
    ("firstName", "Ada"),
    ("lastName", "Lovelace"),
    ("username", "ada"),
];

#[tokio::test]
async fn test_create_profile_redirects_home() {
    let app = TestApp::new();
    let session = app.harness.sign_in("user_1", "ada@homeaway.test");

    let response = app
        .submit_form("POST", "/api/profile", PROFILE, Some(&session))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["outcome"], "redirect");
    assert_eq!(response.body["redirect_to"], "/");

    let profile = app.get("/api/profile", Some(&session)).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["data"]["username"], "ada");
    assert_eq!(profile.body["data"]["clerkId"], "user_1");
}

#[tokio::test]
async fn test_create_profile_signed_out() {
    let app = TestApp::new();
    let response = app.submit_form("POST", "/api/profile", PROFILE, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Please login to create a profile");
}

#[tokio::test]
async fn test_create_profile_twice_conflicts() {
    let app = TestApp::new();
    let session = app.harness.sign_in("user_1", "ada@homeaway.test");

    app.submit_form("POST", "/api/profile", PROFILE, Some(&session))
        .await;
    let second = app
        .submit_form("POST", "/api/profile", PROFILE, Some(&session))
        .await;

    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["reason"], "conflict");
    assert_eq!(app.harness.profiles.len(), 1);
}

#[tokio::test]
async fn test_invalid_profile_lists_paths() {
    let app = TestApp::new();
    let session = app.harness.sign_in("user_1", "ada@homeaway.test");

    let response = app
        .submit_form(
            "POST",
            "/api/profile",
            &[("firstName", "A"), ("lastName", "L"), ("username", "ada")],
            Some(&session),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "firstName,lastName");
    assert_eq!(response.body["fields"].as_array().unwrap().len(), 2);
    assert_eq!(app.harness.profiles.writes(), 0);
}

#[tokio::test]
async fn test_update_profile_without_profile_redirects_to_create() {
    let app = TestApp::new();
    let session = app.harness.sign_in("user_1", "ada@homeaway.test");

    let response = app
        .submit_form("PUT", "/api/profile", PROFILE, Some(&session))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["outcome"], "profile_required");
    assert_eq!(response.body["redirect_to"], "/profile/create");
}

#[tokio::test]
async fn test_update_profile_image() {
    let app = TestApp::new();
    let session = app.harness.signed_up("user_1").await;

    let before = app.get("/api/profile/image", Some(&session)).await;
    assert!(before.body["data"]["profile_image"].is_null());

    let response = app
        .submit_multipart(
            "PUT",
            "/api/profile/image",
            MultipartBody::new().file("image", "me.png", "image/png", b"\x89PNG"),
            Some(&session),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Profile image updated successfully");

    let after = app.get("/api/profile/image", Some(&session)).await;
    let url = after.body["data"]["profile_image"].as_str().unwrap();
    assert!(url.starts_with("https://storage.test/home-away/"));
    assert!(url.ends_with("-me.png"));
}

#[tokio::test]
async fn test_update_profile_image_upload_failure() {
    let app = TestApp::new();
    let session = app.harness.signed_up("user_1").await;
    app.harness.storage.fail_uploads(true);

    let response = app
        .submit_multipart(
            "PUT",
            "/api/profile/image",
            MultipartBody::new().file("image", "me.png", "image/png", b"\x89PNG"),
            Some(&session),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["message"], "Failed to upload image");
    assert_eq!(
        app.harness.profiles.get("user_1").unwrap().profile_image,
        ""
    );
}
