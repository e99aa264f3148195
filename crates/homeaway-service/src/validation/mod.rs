//! Declarative validation of form submissions.
//!
//! A schema is a struct deriving [`validator::Validate`] plus a
//! [`FormSchema`] impl that pulls its fields out of a [`FormData`],
//! coercing numbers on the way. [`validate_with_schema`] runs both steps
//! and reports every violated path at once, in schema field order.

mod coerce;
pub mod image;
pub mod profile;
pub mod property;

use std::fmt;

use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::form::FormData;

pub use image::ImageInput;
pub use profile::ProfileInput;
pub use property::PropertyInput;

/// One violated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Field path as submitted, e.g. `firstName` or `image.size`.
    pub path: String,
    /// Human-readable reason.
    pub message: String,
}

impl FieldViolation {
    /// Create a violation.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Every violation found while validating one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    /// Wrap a non-empty list of violations.
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Violated paths joined with commas, e.g. `firstName,username`.
    pub fn message(&self) -> String {
        self.violations
            .iter()
            .map(|v| v.path.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Per-field detail.
    pub fn fields(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Combine two failures, keeping their order.
    pub fn merge(mut self, other: ValidationFailure) -> Self {
        self.violations.extend(other.violations);
        self
    }
}

/// A typed payload that can be parsed out of a form submission.
pub trait FormSchema: Validate + Sized {
    /// Paths in declaration order. Violations are reported in this order.
    const PATHS: &'static [&'static str];

    /// Build the candidate payload from `form`, recording missing or
    /// uncoercible fields in `violations`. Placeholders stand in for the
    /// bad values so that the remaining fields can still be checked.
    fn extract(form: &FormData, violations: &mut Vec<FieldViolation>) -> Self;

    /// Map a struct field name reported by `validator` to its form path.
    fn path_of(field: &str) -> String;
}

/// Parse and validate `form` against schema `S`.
///
/// On failure every violated path is reported once, in the order of
/// [`FormSchema::PATHS`]. A field that could not be extracted is reported
/// with the extraction reason only.
pub fn validate_with_schema<S: FormSchema>(form: &FormData) -> Result<S, ValidationFailure> {
    let mut violations = Vec::new();
    let candidate = S::extract(form, &mut violations);

    if let Err(errors) = candidate.validate() {
        violations.extend(collect::<S>(&errors));
    }

    if violations.is_empty() {
        return Ok(candidate);
    }

    let mut seen = Vec::with_capacity(violations.len());
    violations.retain(|v| {
        if seen.contains(&v.path) {
            false
        } else {
            seen.push(v.path.clone());
            true
        }
    });
    violations.sort_by_key(|v| {
        S::PATHS
            .iter()
            .position(|p| *p == v.path)
            .unwrap_or(usize::MAX)
    });

    Err(ValidationFailure::new(violations))
}

fn collect<S: FormSchema>(errors: &ValidationErrors) -> Vec<FieldViolation> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let path = S::path_of(&field);
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                FieldViolation::new(path.clone(), message)
            })
        })
        .collect()
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ValidationFailure {}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
