//! Action failure taxonomy.

use tracing::{error, warn};

use homeaway_core::error::{AppError, ErrorKind};

use super::outcome::{ActionOutcome, FailureReason};
use crate::validation::ValidationFailure;

/// Message reported for any storage failure.
pub const UPLOAD_FAILED: &str = "Failed to upload image";

/// Why an action stopped before completing.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// No caller could be resolved.
    #[error("{0}")]
    AuthenticationRequired(String),

    /// The caller has not created a profile yet.
    #[error("Profile required")]
    ProfileRequired {
        /// Where to send the caller.
        redirect_to: String,
    },

    /// The submission did not match its schema.
    #[error(transparent)]
    ValidationFailed(#[from] ValidationFailure),

    /// The image could not be stored.
    #[error("Failed to upload image")]
    UploadFailed(#[source] AppError),

    /// The repository write (or a collaborator call) failed.
    #[error("{message}")]
    PersistenceFailed {
        /// Reported message.
        message: String,
        /// Underlying error.
        #[source]
        source: AppError,
    },

    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl From<AppError> for ActionError {
    fn from(err: AppError) -> Self {
        match err.kind {
            ErrorKind::NotFound => Self::NotFound(err.message),
            ErrorKind::Authentication => Self::AuthenticationRequired(err.message),
            _ => Self::PersistenceFailed {
                message: err.message.clone(),
                source: err,
            },
        }
    }
}

impl ActionError {
    /// Fold into the outcome reported to the caller, logging anything that
    /// is not ordinary control flow.
    pub fn into_outcome(self, action: &'static str) -> ActionOutcome {
        match self {
            Self::AuthenticationRequired(message) => ActionOutcome::AuthError { message },
            Self::ProfileRequired { redirect_to } => ActionOutcome::ProfileRequired { redirect_to },
            Self::ValidationFailed(failure) => {
                warn!(action, paths = %failure.message(), "Validation failed");
                ActionOutcome::ValidationError {
                    message: failure.message(),
                    fields: failure.fields().to_vec(),
                }
            }
            Self::UploadFailed(source) => {
                error!(action, error = %source, "Image upload failed");
                ActionOutcome::Failed {
                    message: UPLOAD_FAILED.to_string(),
                    reason: FailureReason::Upload,
                }
            }
            Self::PersistenceFailed { message, source } => {
                let reason = if source.is(ErrorKind::Conflict) {
                    warn!(action, error = %source, "Write rejected");
                    FailureReason::Conflict
                } else {
                    error!(action, error = %source, "Write failed");
                    FailureReason::Persistence
                };
                ActionOutcome::Failed { message, reason }
            }
            Self::NotFound(message) => ActionOutcome::NotFound { message },
        }
    }
}
