//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A login session.
///
/// Created on login and revoked on logout, password change, or when a
/// rotated-out refresh token is presented again. Only the SHA-256 hash of
/// the current refresh token is stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier (the `sid` claim).
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// SHA-256 hash of the currently valid refresh token.
    #[serde(skip_serializing)]
    pub refresh_token_hash: Option<String>,
    /// User-Agent header value at login.
    pub user_agent: Option<String>,
    /// Client IP address at login.
    pub ip_address: Option<String>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// When the session expires (refresh token lifetime).
    pub expires_at: DateTime<Utc>,
    /// Last time a token of this session was used.
    pub last_used_at: DateTime<Utc>,
    /// When the session was revoked.
    pub revoked_at: Option<DateTime<Utc>>,
    /// Why the session was revoked.
    pub revoked_reason: Option<String>,
}

impl Session {
    /// Check whether the session is still usable.
    pub fn is_active(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }

    /// Check whether the session has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Data required to create a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    /// Pre-generated session id, embedded in the issued tokens.
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// SHA-256 hash of the first refresh token.
    pub refresh_token_hash: String,
    /// User-Agent header.
    pub user_agent: Option<String>,
    /// Client IP address.
    pub ip_address: Option<String>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}
