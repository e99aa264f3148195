//! Country reference handlers.

use axum::Json;
use axum::extract::Path;

use homeaway_entity::country::Country;
use homeaway_service::queries::{countries, find_country};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;

/// GET /api/countries
pub async fn list_countries() -> Json<ApiResponse<&'static [Country]>> {
    Json(ApiResponse::ok(countries()))
}

/// GET /api/countries/{code}
pub async fn get_country(
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<&'static Country>>, ApiError> {
    Ok(Json(ApiResponse::ok(find_country(&code)?)))
}
