//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let database = match &state.database {
        Some(db) => match db.health_check().await {
            Ok(true) => "connected",
            _ => "unavailable",
        },
        None => "not configured",
    };
    let storage = match state.images.provider().health_check().await {
        Ok(true) => "available",
        _ => "unavailable",
    };
    let status = if database == "unavailable" || storage == "unavailable" {
        "degraded"
    } else {
        "ok"
    };

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: status.to_string(),
        database: database.to_string(),
        storage: storage.to_string(),
        storage_provider: state.images.provider().provider_type().to_string(),
    }))
}
