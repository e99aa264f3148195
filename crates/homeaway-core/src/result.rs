//! Convenience result type alias for HomeAway.

use crate::error::AppError;

/// A specialized `Result` type for HomeAway operations.
pub type AppResult<T> = Result<T, AppError>;
