//! HomeAway Server: property rental backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use homeaway_api::AppState;
use homeaway_auth::{JwtDecoder, JwtIdentityProvider};
use homeaway_cache::{CacheManager, ViewCache};
use homeaway_core::config::AppConfig;
use homeaway_core::error::AppError;
use homeaway_database::{DatabasePool, PgProfileRepository, PgPropertyRepository};
use homeaway_service::Services;
use homeaway_storage::ImageStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `HOMEAWAY_ENV` overlay and environment
/// variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("HOMEAWAY_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting HomeAway");

    // ── Step 1: Database connection + migrations ─────────────────
    let database = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        homeaway_database::migration::run_migrations(database.pool()).await?;
    }

    // ── Step 2: Cache ────────────────────────────────────────────
    let cache = CacheManager::new(&config.cache);
    let views = ViewCache::new(cache.clone(), config.cache.enabled);

    // ── Step 3: Image storage ────────────────────────────────────
    let images = ImageStore::from_config(&config.storage).await?;

    // ── Step 4: Repositories ─────────────────────────────────────
    let profiles = Arc::new(PgProfileRepository::new(database.pool().clone()));
    let properties = Arc::new(PgPropertyRepository::new(database.pool().clone()));

    // ── Step 5: Identity ─────────────────────────────────────────
    if config.auth.jwt_secret == AppConfig::default().auth.jwt_secret {
        tracing::warn!("auth.jwt_secret is the built-in default; set HOMEAWAY__AUTH__JWT_SECRET");
    }
    let identity = Arc::new(JwtIdentityProvider::new(
        JwtDecoder::new(&config.auth),
        profiles.clone(),
        cache,
    ));

    // ── Step 6: Services ─────────────────────────────────────────
    let services = Services::new(identity, profiles, properties, images.clone(), views);

    // ── Step 7: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(config, services, images, Some(database.clone()));
    let app = homeaway_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "HomeAway server listening");

    // ── Step 8: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if tokio::time::timeout(grace, database.close()).await.is_err() {
        tracing::warn!(grace_seconds = grace.as_secs(), "Database pool did not close in time");
    }

    tracing::info!("HomeAway server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
