//! Local filesystem storage provider.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use homeaway_core::error::{AppError, ErrorKind};
use homeaway_core::result::AppResult;
use homeaway_core::traits::storage::StorageProvider;

/// Stores objects as files under `{root}/{bucket}/`.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    bucket_dir: PathBuf,
    bucket: String,
    public_base_url: String,
}

impl LocalStorageProvider {
    /// Create the provider, making sure the bucket directory exists.
    pub async fn new(root_path: &str, bucket: &str, public_base_url: &str) -> AppResult<Self> {
        let bucket_dir = PathBuf::from(root_path).join(bucket);
        fs::create_dir_all(&bucket_dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create bucket directory: {}", bucket_dir.display()),
                e,
            )
        })?;
        Ok(Self {
            bucket_dir,
            bucket: bucket.to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.bucket_dir.join(path.trim_start_matches('/'))
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.bucket_dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false))
    }

    async fn write(&self, path: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        let full_path = self.resolve(path);
        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write object: {path}"),
                e,
            )
        })?;

        debug!(path, content_type, bytes = data.len(), "Wrote object");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, self.bucket, path)
    }
}
