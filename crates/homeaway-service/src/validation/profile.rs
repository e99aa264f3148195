//! Profile form schema.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::form::FormData;

use super::{FieldViolation, FormSchema, coerce};

/// Validated profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProfileInput {
    #[validate(length(min = 2, message = "firstname must be at least 2 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "lastname must be at least 2 characters"))]
    pub last_name: String,
    #[validate(length(min = 2, message = "username must be at least 2 characters"))]
    pub username: String,
}

impl FormSchema for ProfileInput {
    const PATHS: &'static [&'static str] = &["firstName", "lastName", "username"];

    fn extract(form: &FormData, violations: &mut Vec<FieldViolation>) -> Self {
        Self {
            first_name: coerce::text(form, "firstName", violations),
            last_name: coerce::text(form, "lastName", violations),
            username: coerce::text(form, "username", violations),
        }
    }

    fn path_of(field: &str) -> String {
        match field {
            "first_name" => "firstName",
            "last_name" => "lastName",
            other => other,
        }
        .to_string()
    }
}
