//! Form value extraction helpers shared by the schemas.

use crate::form::FormData;

use super::FieldViolation;

pub(crate) const REQUIRED: &str = "Required";

/// Text value of `name`, or a `Required` violation and an empty placeholder.
pub(crate) fn text(form: &FormData, name: &str, violations: &mut Vec<FieldViolation>) -> String {
    match form.field(name) {
        Some(value) => value.to_string(),
        None => {
            violations.push(FieldViolation::new(name, REQUIRED));
            String::new()
        }
    }
}

/// Integer value of `name`.
///
/// Blank input coerces to 0. Anything that is not a finite whole number
/// within `i32` is a violation and yields a 0 placeholder.
pub(crate) fn integer(form: &FormData, name: &str, violations: &mut Vec<FieldViolation>) -> i32 {
    let Some(raw) = form.field(name) else {
        violations.push(FieldViolation::new(name, REQUIRED));
        return 0;
    };
    match parse_integer(raw) {
        Ok(value) => value,
        Err(reason) => {
            violations.push(FieldViolation::new(name, reason));
            0
        }
    }
}

pub(crate) fn parse_integer(raw: &str) -> Result<i32, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let number: f64 = trimmed
        .parse()
        .map_err(|_| "Expected number, received nan")?;
    if !number.is_finite() {
        return Err("Expected number, received nan");
    }
    if number.fract() != 0.0 {
        return Err("Expected integer, received float");
    }
    if number > f64::from(i32::MAX) {
        return Err("Number must be less than or equal to 2147483647");
    }
    if number < f64::from(i32::MIN) {
        return Err("Number must be greater than or equal to -2147483648");
    }
    Ok(number as i32)
}
