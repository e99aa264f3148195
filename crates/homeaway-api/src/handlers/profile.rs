//! Profile handlers.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::dto::response::{ApiResponse, ProfileImageResponse};
use crate::error::ApiError;
use crate::extractors::{FormSubmission, Session};
use crate::outcome::ActionReply;
use crate::state::AppState;

/// GET /api/profile
pub async fn get_profile(State(state): State<AppState>, session: Session) -> Response {
    match state.services.profile_queries.fetch_profile(&session).await {
        Ok(profile) => Json(ApiResponse::ok(profile)).into_response(),
        Err(e) => ActionReply(e.into_outcome("fetch_profile")).into_response(),
    }
}

/// GET /api/profile/image
pub async fn get_profile_image(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ApiResponse<ProfileImageResponse>>, ApiError> {
    let profile_image = state
        .services
        .profile_queries
        .fetch_profile_image(&session)
        .await?;
    Ok(Json(ApiResponse::ok(ProfileImageResponse { profile_image })))
}

/// POST /api/profile
pub async fn create_profile(
    State(state): State<AppState>,
    session: Session,
    FormSubmission(form): FormSubmission,
) -> ActionReply {
    ActionReply(
        state
            .services
            .profile_actions
            .create_profile(&session, &form)
            .await,
    )
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    FormSubmission(form): FormSubmission,
) -> ActionReply {
    ActionReply(
        state
            .services
            .profile_actions
            .update_profile(&session, &form)
            .await,
    )
}

/// PUT /api/profile/image
pub async fn update_profile_image(
    State(state): State<AppState>,
    session: Session,
    FormSubmission(form): FormSubmission,
) -> ActionReply {
    ActionReply(
        state
            .services
            .profile_actions
            .update_profile_image(&session, &form)
            .await,
    )
}
