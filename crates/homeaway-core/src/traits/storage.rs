//! Storage provider trait for pluggable object storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for object storage backends.
///
/// Implementations exist for the local filesystem and for a
/// Supabase-compatible HTTP object store. Paths are relative to the
/// provider's bucket.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "supabase").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write bytes to an object at the given path.
    async fn write(&self, path: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Publicly reachable URL of the object at the given path.
    fn public_url(&self, path: &str) -> String;
}
