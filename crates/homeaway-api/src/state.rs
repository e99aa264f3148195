//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use homeaway_core::config::AppConfig;
use homeaway_database::DatabasePool;
use homeaway_service::Services;
use homeaway_storage::ImageStore;

/// Shared state for all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Actions and queries.
    pub services: Services,
    /// Image store, probed by the detailed health check.
    pub images: ImageStore,
    /// Database pool. `None` when the router runs against in-memory
    /// repositories.
    pub database: Option<DatabasePool>,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        services: Services,
        images: ImageStore,
        database: Option<DatabasePool>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            services,
            images,
            database,
            started_at: Instant::now(),
        }
    }
}
