//! Image upload gateway.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::info;

use homeaway_core::config::StorageConfig;
use homeaway_core::error::AppError;
use homeaway_core::result::AppResult;
use homeaway_core::traits::storage::StorageProvider;

use crate::providers::{LocalStorageProvider, SupabaseStorageProvider};

/// Uploads images to the configured provider and hands back public URLs.
///
/// Stateless apart from the provider handle; each upload is a single
/// write with no retry.
#[derive(Debug, Clone)]
pub struct ImageStore {
    provider: Arc<dyn StorageProvider>,
}

impl ImageStore {
    /// Build the provider named by `config.provider`.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let provider: Arc<dyn StorageProvider> = match config.provider.as_str() {
            "local" => {
                info!(root = %config.local.root_path, bucket = %config.bucket, "Using local image storage");
                Arc::new(
                    LocalStorageProvider::new(
                        &config.local.root_path,
                        &config.bucket,
                        &config.local.public_base_url,
                    )
                    .await?,
                )
            }
            "supabase" => {
                info!(url = %config.supabase.url, bucket = %config.bucket, "Using Supabase image storage");
                Arc::new(SupabaseStorageProvider::new(
                    &config.supabase.url,
                    &config.supabase.service_key,
                    &config.bucket,
                )?)
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: '{other}'. Supported: local, supabase"
                )));
            }
        };
        Ok(Self { provider })
    }

    /// Wrap an existing provider.
    pub fn from_provider(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &dyn StorageProvider {
        self.provider.as_ref()
    }

    /// Store `data` under a fresh object name and return its public URL.
    pub async fn upload(&self, file_name: &str, content_type: &str, data: Bytes) -> AppResult<String> {
        let name = object_name(Utc::now().timestamp_millis(), file_name);
        self.provider.write(&name, data, content_type).await?;
        Ok(self.provider.public_url(&name))
    }
}

/// `{millis}-{file name}`, with the file name reduced to its last path
/// segment and anything outside `[A-Za-z0-9._-]` replaced by `_`.
pub fn object_name(millis: i64, file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        format!("{millis}-image")
    } else {
        format!("{millis}-{cleaned}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_name_keeps_simple_names() {
        assert_eq!(object_name(1700000000000, "cabin.png"), "1700000000000-cabin.png");
    }

    #[test]
    fn test_object_name_strips_directories() {
        assert_eq!(object_name(5, "../../etc/passwd"), "5-passwd");
        assert_eq!(object_name(5, "C:\\photos\\lake house.jpg"), "5-lake_house.jpg");
    }

    #[test]
    fn test_object_name_never_empty() {
        assert_eq!(object_name(5, ""), "5-image");
        assert_eq!(object_name(5, "dir/"), "5-image");
        assert_eq!(object_name(5, ".."), "5-image");
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorageConfig::default();
        config.local.root_path = dir.path().to_string_lossy().into_owned();
        config.local.public_base_url = "http://cdn.test".to_string();

        let store = ImageStore::from_config(&config).await.unwrap();
        let url = store
            .upload("cabin.png", "image/png", Bytes::from_static(b"img"))
            .await
            .unwrap();

        assert!(url.starts_with("http://cdn.test/home-away/"));
        assert!(url.ends_with("-cabin.png"));
        let name = url.rsplit('/').next().unwrap();
        assert!(dir.path().join("home-away").join(name).is_file());
    }

    #[tokio::test]
    async fn test_unknown_provider_is_configuration_error() {
        let config = StorageConfig {
            provider: "ftp".to_string(),
            ..StorageConfig::default()
        };
        let err = ImageStore::from_config(&config).await.unwrap_err();
        assert!(err.is(homeaway_core::error::ErrorKind::Configuration));
    }
}
