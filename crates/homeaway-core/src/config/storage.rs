//! Image storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider to use: `"local"` or `"supabase"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Bucket that receives uploaded images.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Maximum accepted request body in bytes. Kept above the 1 MiB image
    /// limit so oversized images reach validation instead of being cut off.
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// Supabase storage configuration.
    #[serde(default)]
    pub supabase: SupabaseStorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            bucket: default_bucket(),
            max_upload_size_bytes: default_max_upload(),
            local: LocalStorageConfig::default(),
            supabase: SupabaseStorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for local file storage.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// Base URL under which the root is publicly served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

/// Supabase storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SupabaseStorageConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    #[serde(default)]
    pub url: String,
    /// Service role key used for uploads.
    #[serde(default)]
    pub service_key: String,
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_bucket() -> String {
    "home-away".to_string()
}

fn default_max_upload() -> u64 {
    5_242_880 // 5 MB
}

fn default_local_root() -> String {
    "./data/storage".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/uploads".to_string()
}
