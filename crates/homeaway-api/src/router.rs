//! Route definitions for the HomeAway HTTP API.
//!
//! All routes are mounted under `/api`. Images written by the local
//! storage provider are served from `/uploads`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::get,
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(country_routes())
        .merge(property_routes())
        .merge(profile_routes());

    let mut router = Router::new().nest("/api", api_routes);

    if state.config.storage.provider == "local" {
        router = router.nest_service(
            "/uploads",
            ServeDir::new(&state.config.storage.local.root_path),
        );
    }

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    router
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

fn country_routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(handlers::country::list_countries))
        .route("/countries/{code}", get(handlers::country::get_country))
}

fn property_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/properties",
            get(handlers::property::list_properties).post(handlers::property::create_property),
        )
        .route("/properties/{id}", get(handlers::property::get_property))
}

fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(handlers::profile::get_profile)
                .post(handlers::profile::create_profile)
                .put(handlers::profile::update_profile),
        )
        .route(
            "/profile/image",
            get(handlers::profile::get_profile_image).put(handlers::profile::update_profile_image),
        )
}
