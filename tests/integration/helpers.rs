//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use homeaway_api::AppState;
use homeaway_core::config::AppConfig;
use homeaway_core::types::SessionContext;
use homeaway_service::testing::Harness;
use homeaway_storage::ImageStore;

/// Boundary used by [`MultipartBody`].
const BOUNDARY: &str = "homeaway-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory collaborators behind the router
    pub harness: Harness,
}

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let harness = Harness::new();
        let mut config = AppConfig::default();
        config.storage.provider = "memory".to_string();

        let state = AppState::new(
            config,
            harness.services.clone(),
            ImageStore::from_provider(harness.storage.clone()),
            None,
        );

        Self {
            router: homeaway_api::build_router(state),
            harness,
        }
    }

    /// GET `uri`, optionally as the holder of `session`.
    pub async fn get(&self, uri: &str, session: Option<&SessionContext>) -> TestResponse {
        let builder = authorized(Request::builder().method("GET").uri(uri), session);
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Submit a urlencoded form.
    pub async fn submit_form(
        &self,
        method: &str,
        uri: &str,
        fields: &[(&str, &str)],
        session: Option<&SessionContext>,
    ) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let builder = authorized(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            session,
        );
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Submit a multipart form.
    pub async fn submit_multipart(
        &self,
        method: &str,
        uri: &str,
        body: MultipartBody,
        session: Option<&SessionContext>,
    ) -> TestResponse {
        let builder = authorized(
            Request::builder().method(method).uri(uri).header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ),
            session,
        );
        self.send(builder.body(Body::from(body.finish())).unwrap())
            .await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse { status, body }
    }
}

fn authorized(
    builder: http::request::Builder,
    session: Option<&SessionContext>,
) -> http::request::Builder {
    match session.and_then(|s| s.bearer_token.as_deref()) {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            b' ' => "+".to_string(),
            other => format!("%{other:02X}"),
        })
        .collect()
}

/// Builder for `multipart/form-data` bodies.
#[derive(Debug, Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.buf
    }
}

/// Fields of a valid listing, without the image.
pub fn listing_fields(name: &str, category: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("tagline", "Quiet cabin by the lake".to_string()),
        ("category", category.to_string()),
        ("country", "US".to_string()),
        (
            "description",
            "a warm and bright room with a view of the lake".to_string(),
        ),
        ("price", "120".to_string()),
        ("guests", "4".to_string()),
        ("bedrooms", "2".to_string()),
        ("beds", "2".to_string()),
        ("baths", "1".to_string()),
        ("amenities", "[]".to_string()),
    ]
}

/// [`MultipartBody`] carrying `fields`.
pub fn multipart_of(fields: &[(&'static str, String)]) -> MultipartBody {
    fields
        .iter()
        .fold(MultipartBody::new(), |body, (k, v)| body.field(k, v))
}
