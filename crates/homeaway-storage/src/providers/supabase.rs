//! Supabase storage provider.
//!
//! Talks to the Supabase Storage REST API:
//!
//! - `POST {url}/storage/v1/object/{bucket}/{path}` upload
//! - `GET  {url}/storage/v1/bucket/{bucket}` health check
//! - `{url}/storage/v1/object/public/{bucket}/{path}` public read URL

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use homeaway_core::error::{AppError, ErrorKind};
use homeaway_core::result::AppResult;
use homeaway_core::traits::storage::StorageProvider;

/// Supabase-compatible HTTP object storage.
#[derive(Debug, Clone)]
pub struct SupabaseStorageProvider {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

impl SupabaseStorageProvider {
    /// Create a new provider for `bucket` in the project at `url`.
    pub fn new(url: &str, service_key: &str, bucket: &str) -> AppResult<Self> {
        if url.is_empty() || service_key.is_empty() {
            return Err(AppError::configuration(
                "storage.supabase.url and storage.supabase.service_key are required",
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            service_key: service_key.to_string(),
        })
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
    }

    async fn send(&self, request: reqwest::RequestBuilder, action: &str) -> AppResult<reqwest::Response> {
        let response = self.authorized(request).send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Supabase {action} request failed"),
                e,
            )
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = format!("Supabase {action} returned {status}: {body}");
        if status == StatusCode::NOT_FOUND {
            Err(AppError::not_found(message))
        } else {
            Err(AppError::external_service(message))
        }
    }
}

#[async_trait]
impl StorageProvider for SupabaseStorageProvider {
    fn provider_type(&self) -> &str {
        "supabase"
    }

    async fn health_check(&self) -> AppResult<bool> {
        let url = format!("{}/storage/v1/bucket/{}", self.base_url, self.bucket);
        match self.send(self.client.get(url), "bucket lookup").await {
            Ok(_) => Ok(true),
            Err(e) => {
                debug!(error = %e, "Supabase health check failed");
                Ok(false)
            }
        }
    }

    async fn write(&self, path: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        let size = data.len();
        let request = self
            .client
            .post(self.object_url(path))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(data);
        self.send(request, "upload").await?;

        debug!(path, size, "Uploaded object to Supabase");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::Request;
    use axum::http::StatusCode as HttpStatus;

    use super::*;
    use crate::ImageStore;

    /// One request as seen by the stand-in storage server.
    #[derive(Debug, Clone)]
    struct Seen {
        method: String,
        path: String,
        apikey: Option<String>,
        authorization: Option<String>,
        content_type: Option<String>,
        upsert: Option<String>,
        body: Vec<u8>,
    }

    /// Serve every request with `status`, recording what arrived.
    async fn storage_server(status: HttpStatus) -> (String, Arc<Mutex<Vec<Seen>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let app = axum::Router::new().fallback(move |request: Request| {
            let recorder = recorder.clone();
            async move {
                let (parts, body) = request.into_parts();
                let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
                let header = |name: &str| {
                    parts
                        .headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string)
                };
                recorder.lock().unwrap().push(Seen {
                    method: parts.method.to_string(),
                    path: parts.uri.path().to_string(),
                    apikey: header("apikey"),
                    authorization: header("authorization"),
                    content_type: header("content-type"),
                    upsert: header("x-upsert"),
                    body: body.to_vec(),
                });
                (status, "{}")
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), seen)
    }

    #[test]
    fn test_requires_credentials() {
        let err = SupabaseStorageProvider::new("", "", "home-away").unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }

    #[test]
    fn test_urls() {
        let provider =
            SupabaseStorageProvider::new("https://abc.supabase.co/", "key", "home-away").unwrap();
        assert_eq!(
            provider.object_url("1-a.png"),
            "https://abc.supabase.co/storage/v1/object/home-away/1-a.png"
        );
        assert_eq!(
            provider.public_url("1-a.png"),
            "https://abc.supabase.co/storage/v1/object/public/home-away/1-a.png"
        );
    }

    #[tokio::test]
    async fn test_write_posts_object_with_service_key() {
        let (url, seen) = storage_server(HttpStatus::OK).await;
        let provider = SupabaseStorageProvider::new(&url, "service-key", "home-away").unwrap();

        provider
            .write("1-cabin.png", Bytes::from_static(b"png"), "image/png")
            .await
            .unwrap();

        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        let request = &seen[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/storage/v1/object/home-away/1-cabin.png");
        assert_eq!(request.apikey.as_deref(), Some("service-key"));
        assert_eq!(request.authorization.as_deref(), Some("Bearer service-key"));
        assert_eq!(request.content_type.as_deref(), Some("image/png"));
        assert_eq!(request.upsert.as_deref(), Some("false"));
        assert_eq!(request.body, b"png");
    }

    #[tokio::test]
    async fn test_rejected_write_is_external_service_error() {
        let (url, _) = storage_server(HttpStatus::BAD_REQUEST).await;
        let provider = SupabaseStorageProvider::new(&url, "service-key", "home-away").unwrap();

        let err = provider
            .write("1-cabin.png", Bytes::from_static(b"png"), "image/png")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::ExternalService));
        assert!(err.message.contains("400"));
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let (url, seen) = storage_server(HttpStatus::OK).await;
        let provider = SupabaseStorageProvider::new(&url, "service-key", "home-away").unwrap();
        let store = ImageStore::from_provider(Arc::new(provider));

        let public = store
            .upload("lake house.jpg", "image/jpeg", Bytes::from_static(b"jpg"))
            .await
            .unwrap();

        let name = public.rsplit('/').next().unwrap().to_string();
        assert!(name.ends_with("-lake_house.jpg"));
        assert_eq!(
            public,
            format!("{url}/storage/v1/object/public/home-away/{name}")
        );
        assert_eq!(
            seen.lock().unwrap()[0].path,
            format!("/storage/v1/object/home-away/{name}")
        );
    }

    #[tokio::test]
    async fn test_health_check_follows_bucket_lookup() {
        let (url, seen) = storage_server(HttpStatus::OK).await;
        let provider = SupabaseStorageProvider::new(&url, "service-key", "home-away").unwrap();
        assert!(provider.health_check().await.unwrap());
        assert_eq!(seen.lock().unwrap()[0].path, "/storage/v1/bucket/home-away");

        let (url, _) = storage_server(HttpStatus::INTERNAL_SERVER_ERROR).await;
        let provider = SupabaseStorageProvider::new(&url, "service-key", "home-away").unwrap();
        assert!(!provider.health_check().await.unwrap());
    }
}
