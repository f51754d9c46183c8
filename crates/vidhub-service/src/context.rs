//! Request context carrying the authenticated user and session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vidhub_core::error::AppError;

/// Context for the current authenticated request.
///
/// Built by the auth extractor and passed into service methods so that
/// every operation knows *who* is acting and from *which* session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The current session ID.
    pub session_id: Uuid,
    /// The user name from the access token.
    pub user_name: String,
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        session_id: Uuid,
        user_name: String,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id,
            session_id,
            user_name,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// Whether the caller is the given user.
    pub fn is_user(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Fail with `Authorization` unless the caller owns the resource.
    pub fn ensure_owner(&self, owner_id: Uuid, message: &str) -> Result<(), AppError> {
        if self.is_user(owner_id) {
            Ok(())
        } else {
            Err(AppError::authorization(message))
        }
    }
}
