//! Path-scoped cache for rendered reads.
//!
//! Reads are stored under the page path that displays them. A mutation
//! calls [`ViewCache::revalidate`] with the affected path and every read
//! stored under that path is dropped, so the next request goes to the
//! database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use homeaway_core::result::AppResult;
use homeaway_core::traits::cache::CacheProvider;

use crate::keys;
use crate::provider::CacheManager;

/// Revalidation count of a path, captured when a read misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Outcome of [`ViewCache::get`].
#[derive(Debug)]
pub enum ViewLookup<T> {
    /// A cached value.
    Hit(T),
    /// Nothing usable; pass the generation back to [`ViewCache::put`].
    Miss(Generation),
}

/// View cache with path-based invalidation.
///
/// Each path carries a generation that [`ViewCache::revalidate`] bumps.
/// A read computed before a revalidation is never left in the cache.
#[derive(Debug, Clone)]
pub struct ViewCache {
    cache: CacheManager,
    enabled: bool,
    generations: Arc<Mutex<HashMap<String, u64>>>,
}

impl ViewCache {
    /// Create a view cache over `cache`. When `enabled` is false every read
    /// misses and writes are dropped.
    pub fn new(cache: CacheManager, enabled: bool) -> Self {
        Self {
            cache,
            enabled,
            generations: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn generations(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.generations.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn generation(&self, path: &str) -> Generation {
        Generation(self.generations().get(path).copied().unwrap_or(0))
    }

    /// Look up a cached read. Corrupt entries are treated as misses.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, variant: &str) -> ViewLookup<T> {
        let generation = self.generation(path);
        if !self.enabled {
            return ViewLookup::Miss(generation);
        }
        let key = keys::view(path, variant);
        match self.cache.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!(key = %key, "View cache hit");
                    ViewLookup::Hit(value)
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding unreadable cache entry");
                    ViewLookup::Miss(generation)
                }
            },
            Ok(None) => ViewLookup::Miss(generation),
            Err(e) => {
                warn!(key = %key, error = %e, "View cache read failed");
                ViewLookup::Miss(generation)
            }
        }
    }

    /// Store a read under `path` unless the path was revalidated since
    /// `generation` was taken. Failures are logged, never surfaced.
    pub async fn put<T: Serialize + Sync>(
        &self,
        path: &str,
        variant: &str,
        generation: Generation,
        value: &T,
    ) {
        if !self.enabled {
            return;
        }
        let key = keys::view(path, variant);
        if self.generation(path) != generation {
            debug!(key = %key, "Skipping stale view write");
            return;
        }

        let result = match serde_json::to_string(value) {
            Ok(raw) => self.cache.set_default(&key, &raw).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            warn!(key = %key, error = %e, "View cache write failed");
            return;
        }

        // Revalidated while the write was in flight.
        if self.generation(path) != generation {
            debug!(key = %key, "Dropping view write overtaken by revalidation");
            if let Err(e) = self.cache.delete(&key).await {
                warn!(key = %key, error = %e, "Failed to drop stale view entry");
            }
        }
    }

    /// Drop every cached read stored under exactly `path`.
    pub async fn revalidate(&self, path: &str) -> AppResult<u64> {
        *self.generations().entry(path.to_string()).or_insert(0) += 1;
        let removed = self.cache.delete_pattern(&keys::view_pattern(path)).await?;
        debug!(path, removed, "Revalidated view path");
        Ok(removed)
    }
}
