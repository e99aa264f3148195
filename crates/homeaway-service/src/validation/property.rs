//! Property form schema.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::form::FormData;

use super::{FieldViolation, FormSchema, coerce};

/// Validated listing fields. The cover image is validated separately by
/// [`ImageInput`](super::ImageInput).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PropertyInput {
    #[validate(custom(function = "name_length"))]
    pub name: String,
    #[validate(custom(function = "tagline_length"))]
    pub tagline: String,
    #[validate(range(min = 0, message = "price must be a positive number."))]
    pub price: i32,
    pub category: String,
    #[validate(custom(function = "description_words"))]
    pub description: String,
    pub country: String,
    #[validate(range(min = 0, message = "guest amount must be a positive number."))]
    pub guests: i32,
    #[validate(range(min = 0, message = "bedrooms amount must be a positive number."))]
    pub bedrooms: i32,
    #[validate(range(min = 0, message = "beds amount must be a positive number."))]
    pub beds: i32,
    #[validate(range(min = 0, message = "baths amount must be a positive number."))]
    pub baths: i32,
    pub amenities: String,
}

/// Inclusive word-count bounds for descriptions.
pub const DESCRIPTION_WORDS: std::ops::RangeInclusive<usize> = 10..=1000;

impl FormSchema for PropertyInput {
    const PATHS: &'static [&'static str] = &[
        "name",
        "tagline",
        "price",
        "category",
        "description",
        "country",
        "guests",
        "bedrooms",
        "beds",
        "baths",
        "amenities",
    ];

    fn extract(form: &FormData, violations: &mut Vec<FieldViolation>) -> Self {
        Self {
            name: coerce::text(form, "name", violations),
            tagline: coerce::text(form, "tagline", violations),
            price: coerce::integer(form, "price", violations),
            category: coerce::text(form, "category", violations),
            description: coerce::text(form, "description", violations),
            country: coerce::text(form, "country", violations),
            guests: coerce::integer(form, "guests", violations),
            bedrooms: coerce::integer(form, "bedrooms", violations),
            beds: coerce::integer(form, "beds", violations),
            baths: coerce::integer(form, "baths", violations),
            amenities: coerce::text(form, "amenities", violations),
        }
    }

    fn path_of(field: &str) -> String {
        field.to_string()
    }
}

fn name_length(value: &str) -> Result<(), ValidationError> {
    char_bounds(value, "name")
}

fn tagline_length(value: &str) -> Result<(), ValidationError> {
    char_bounds(value, "tagline")
}

fn char_bounds(value: &str, field: &'static str) -> Result<(), ValidationError> {
    let count = value.chars().count();
    if count < 2 {
        return Err(ValidationError::new("length")
            .with_message(Cow::Owned(format!("{field} must be at least 2 characters."))));
    }
    if count > 100 {
        return Err(ValidationError::new("length")
            .with_message(Cow::Owned(format!("{field} must be less than 100 characters."))));
    }
    Ok(())
}

/// Words are separated by single spaces, so runs of spaces count empty words.
fn description_words(value: &str) -> Result<(), ValidationError> {
    if DESCRIPTION_WORDS.contains(&value.split(' ').count()) {
        Ok(())
    } else {
        Err(ValidationError::new("word_count")
            .with_message(Cow::Borrowed("description must be between 10 and 1000 words.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_with_schema;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn form() -> FormData {
        FormData::new()
            .with_field("name", "Lake Cabin")
            .with_field("tagline", "Quiet cabin by the lake")
            .with_field("price", "120")
            .with_field("category", "cabin")
            .with_field("description", words(12))
            .with_field("country", "NO")
            .with_field("guests", "4")
            .with_field("bedrooms", "2")
            .with_field("beds", "3")
            .with_field("baths", "1")
            .with_field("amenities", "[]")
    }

    #[test]
    fn test_valid_property() {
        let input: PropertyInput = validate_with_schema(&form()).unwrap();
        assert_eq!(input.price, 120);
        assert_eq!(input.beds, 3);
        assert_eq!(input.country, "NO");
    }

    #[test]
    fn test_description_word_bounds() {
        for (count, ok) in [(9, false), (10, true), (1000, true), (1001, false)] {
            let result =
                validate_with_schema::<PropertyInput>(&form().with_field("description", words(count)));
            assert_eq!(result.is_ok(), ok, "{count} words");
        }
    }

    #[test]
    fn test_blank_numbers_coerce_to_zero() {
        let input: PropertyInput =
            validate_with_schema(&form().with_field("price", "").with_field("baths", "")).unwrap();
        assert_eq!(input.price, 0);
        assert_eq!(input.baths, 0);
    }

    #[test]
    fn test_bad_numbers_are_reported() {
        let failure = validate_with_schema::<PropertyInput>(
            &form()
                .with_field("price", "-1")
                .with_field("guests", "two")
                .with_field("beds", "1.5"),
        )
        .unwrap_err();
        assert_eq!(failure.message(), "price,guests,beds");
        assert_eq!(failure.fields()[0].message, "price must be a positive number.");
    }

    #[test]
    fn test_name_and_tagline_bounds() {
        let long = "x".repeat(101);
        let failure = validate_with_schema::<PropertyInput>(
            &form().with_field("name", "x").with_field("tagline", long),
        )
        .unwrap_err();
        assert_eq!(failure.message(), "name,tagline");
        assert_eq!(failure.fields()[0].message, "name must be at least 2 characters.");
        assert_eq!(
            failure.fields()[1].message,
            "tagline must be less than 100 characters."
        );

        let edge = "x".repeat(100);
        assert!(validate_with_schema::<PropertyInput>(&form().with_field("name", edge)).is_ok());
    }

    #[test]
    fn test_missing_fields_are_required() {
        let failure = validate_with_schema::<PropertyInput>(&FormData::new()).unwrap_err();
        assert_eq!(failure.fields().len(), PropertyInput::PATHS.len());
        assert!(failure.fields().iter().all(|v| v.message == "Required"));
    }
}
