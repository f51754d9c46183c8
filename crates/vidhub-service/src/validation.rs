//! Input normalization shared by services.

use vidhub_core::error::AppError;
use vidhub_core::result::AppResult;

/// Trim a required text field, failing with `message` if it is blank.
pub fn required_text(value: Option<&str>, message: &str) -> AppResult<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::validation(message))
}

/// Trim an optional text field; blank values count as absent.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Normalize an email or user name for storage and lookup.
pub fn normalize_identity(value: &str) -> String {
    value.trim().to_lowercase()
}
