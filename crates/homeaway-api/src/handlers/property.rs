//! Listing handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use homeaway_core::types::PropertyId;
use homeaway_entity::property::{Property, PropertySummary};

use crate::dto::request::PropertySearchParams;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{FormSubmission, Session};
use crate::outcome::ActionReply;
use crate::state::AppState;

/// GET /api/properties?search=&category=
pub async fn list_properties(
    State(state): State<AppState>,
    Query(params): Query<PropertySearchParams>,
) -> Result<Json<ApiResponse<Vec<PropertySummary>>>, ApiError> {
    let summaries = state
        .services
        .property_queries
        .fetch_properties(&params.into())
        .await?;
    Ok(Json(ApiResponse::ok(summaries)))
}

/// GET /api/properties/{id}
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<PropertyId>,
) -> Result<Json<ApiResponse<Property>>, ApiError> {
    let property = state
        .services
        .property_queries
        .fetch_property_details(id)
        .await?;
    Ok(Json(ApiResponse::ok(property)))
}

/// POST /api/properties
pub async fn create_property(
    State(state): State<AppState>,
    session: Session,
    FormSubmission(form): FormSubmission,
) -> ActionReply {
    ActionReply(
        state
            .services
            .property_actions
            .create_property(&session, &form)
            .await,
    )
}
