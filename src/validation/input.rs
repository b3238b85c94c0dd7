use garde::Validate;

use crate::error::{AppError, Result};

/// Runs the `garde` rules of a payload.
///
/// # Returns
///
/// `AppError::Validation` carrying every violated rule, one per line.
pub fn validate<T: Validate<Context = ()>>(input: &T) -> Result<()> {
    input
        .validate()
        .map_err(|report| AppError::Validation(report.to_string().trim().to_string()))
}

/// `garde` rule rejecting values made only of whitespace.
pub fn not_blank(value: &str, _context: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }
    Ok(())
}

/// Trims and lowercases an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
