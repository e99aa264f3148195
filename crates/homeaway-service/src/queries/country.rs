//! Country reference lookups.

use homeaway_core::error::AppError;
use homeaway_core::result::AppResult;
use homeaway_entity::country::{self, Country};

/// Every known country.
pub fn countries() -> &'static [Country] {
    country::all()
}

/// The country with `code`, or a not-found error.
pub fn find_country(code: &str) -> AppResult<&'static Country> {
    country::find(code).ok_or_else(|| AppError::not_found(format!("Unknown country code '{code}'")))
}
