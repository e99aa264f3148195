//! Explicit action results.

use serde::Serialize;

use crate::validation::FieldViolation;

/// Why a [`ActionOutcome::Failed`] happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The image store rejected the upload.
    Upload,
    /// The write collided with existing data.
    Conflict,
    /// The write failed for any other reason.
    Persistence,
}

/// What an action reports back. Redirects are values, not control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Completed; show `message`.
    Success { message: String },
    /// Completed; navigate to `to`.
    Redirect { to: String },
    /// The submission was rejected.
    ValidationError {
        message: String,
        fields: Vec<FieldViolation>,
    },
    /// The caller is signed out.
    AuthError { message: String },
    /// The caller must create a profile first.
    ProfileRequired { redirect_to: String },
    /// The addressed record does not exist.
    NotFound { message: String },
    /// Something went wrong after validation.
    Failed {
        message: String,
        reason: FailureReason,
    },
}

impl ActionOutcome {
    /// Success with a message.
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }

    /// Redirect to `to`.
    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect { to: to.into() }
    }

    /// Whether the action completed.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Redirect { .. })
    }

    /// Human-readable message for this outcome.
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message }
            | Self::ValidationError { message, .. }
            | Self::AuthError { message }
            | Self::NotFound { message }
            | Self::Failed { message, .. } => message,
            Self::Redirect { .. } => "Redirecting",
            Self::ProfileRequired { .. } => "Please create a profile first",
        }
    }

    /// Navigation target, when the outcome carries one.
    pub fn redirect_to(&self) -> Option<&str> {
        match self {
            Self::Redirect { to } => Some(to),
            Self::ProfileRequired { redirect_to } => Some(redirect_to),
            _ => None,
        }
    }

    /// Stable snake_case name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Redirect { .. } => "redirect",
            Self::ValidationError { .. } => "validation_error",
            Self::AuthError { .. } => "auth_error",
            Self::ProfileRequired { .. } => "profile_required",
            Self::NotFound { .. } => "not_found",
            Self::Failed { .. } => "failed",
        }
    }
}
