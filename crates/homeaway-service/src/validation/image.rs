//! Image metadata schema.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::form::FormData;

use super::{FieldViolation, FormSchema, coerce};

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: u64 = 1024 * 1024;

/// Form field carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Metadata of an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ImageInput {
    #[validate(range(max = 1_048_576, message = "File size must be less than 1 MB"))]
    pub size: u64,
    #[validate(custom(function = "image_mime"))]
    pub content_type: String,
    #[validate(length(min = 1, message = "File name is required"))]
    pub name: String,
    pub last_modified: Option<i64>,
}

impl FormSchema for ImageInput {
    const PATHS: &'static [&'static str] = &["image", "image.size", "image.type", "image.name"];

    /// An absent image is a `Required` violation on `image`; the
    /// placeholder then fails nothing else.
    fn extract(form: &FormData, violations: &mut Vec<FieldViolation>) -> Self {
        match form.file(IMAGE_FIELD) {
            Some(file) => Self {
                size: file.size(),
                content_type: file.content_type.clone(),
                name: file.name.clone(),
                last_modified: file.last_modified,
            },
            None => {
                violations.push(FieldViolation::new(IMAGE_FIELD, coerce::REQUIRED));
                Self {
                    size: 0,
                    content_type: "image/*".to_string(),
                    name: "-".to_string(),
                    last_modified: None,
                }
            }
        }
    }

    fn path_of(field: &str) -> String {
        match field {
            "content_type" => "image.type".to_string(),
            other => format!("image.{other}"),
        }
    }
}

fn image_mime(value: &str) -> Result<(), ValidationError> {
    if value.starts_with("image/") {
        Ok(())
    } else {
        Err(ValidationError::new("regex").with_message(Cow::Borrowed("File must be an image")))
    }
}
