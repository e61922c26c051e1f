//! Required-field validation for request bodies.
//!
//! Request DTOs use `Option` for required fields so that a missing or empty
//! value surfaces as a domain `Validation` error (mapped to
//! `invalid-argument` at the HTTP layer) rather than a deserialization
//! rejection.

use crate::error::CoreError;

/// Extract a required, non-empty string field from a request body.
pub fn require_field<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("{name} is required"))),
    }
}
