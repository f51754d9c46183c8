//! Typed path parameter helpers.

use uuid::Uuid;

use vidhub_core::error::AppError;

/// Parses a UUID path segment naming a `what` (e.g. "video").
pub fn parse_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::validation(format!("Invalid {what} id")))
}
