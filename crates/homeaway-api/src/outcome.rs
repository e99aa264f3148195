//! Maps action outcomes to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homeaway_service::{ActionOutcome, FailureReason, FieldViolation};

/// Body of every action response.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    /// Outcome variant in snake_case.
    pub outcome: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Navigation target for redirects and missing profiles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    /// Per-field violations of a rejected submission.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldViolation>,
    /// Failure category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

/// An [`ActionOutcome`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ActionReply(pub ActionOutcome);

/// HTTP status reported for an outcome.
pub fn status_for(outcome: &ActionOutcome) -> StatusCode {
    match outcome {
        ActionOutcome::Success { .. } | ActionOutcome::Redirect { .. } => StatusCode::OK,
        ActionOutcome::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ActionOutcome::AuthError { .. } => StatusCode::UNAUTHORIZED,
        ActionOutcome::ProfileRequired { .. } => StatusCode::CONFLICT,
        ActionOutcome::NotFound { .. } => StatusCode::NOT_FOUND,
        ActionOutcome::Failed { reason, .. } => match reason {
            FailureReason::Upload => StatusCode::BAD_GATEWAY,
            FailureReason::Conflict => StatusCode::CONFLICT,
            FailureReason::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

impl From<&ActionOutcome> for ActionResponse {
    fn from(outcome: &ActionOutcome) -> Self {
        Self {
            outcome: outcome.kind(),
            message: outcome.message().to_string(),
            redirect_to: outcome.redirect_to().map(str::to_string),
            fields: match outcome {
                ActionOutcome::ValidationError { fields, .. } => fields.clone(),
                _ => Vec::new(),
            },
            reason: match outcome {
                ActionOutcome::Failed { reason, .. } => Some(*reason),
                _ => None,
            },
        }
    }
}

impl IntoResponse for ActionReply {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        (status, Json(ActionResponse::from(&self.0))).into_response()
    }
}
