//! Session storage operations wrapping the database repository.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use vidhub_core::error::AppError;
use vidhub_database::repositories::session::SessionRepository;
use vidhub_entity::session::{CreateSession, Session};

/// Session persistence with refresh-token hashing.
#[derive(Debug, Clone)]
pub struct SessionStore {
    repo: Arc<SessionRepository>,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(repo: Arc<SessionRepository>) -> Self {
        Self { repo }
    }

    /// Creates a new session record holding the hash of its first refresh
    /// token. The session expires together with that token.
    pub async fn create_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
        refresh_token: &str,
        expires_at: DateTime<Utc>,
        user_agent: Option<&str>,
        ip_address: Option<&str>,
    ) -> Result<Session, AppError> {
        self.repo
            .create(&CreateSession {
                id: session_id,
                user_id,
                refresh_token_hash: hash_token(refresh_token),
                user_agent: user_agent.map(String::from),
                ip_address: ip_address.map(String::from),
                expires_at,
            })
            .await
    }

    /// Finds a session by ID.
    pub async fn find_by_id(&self, session_id: Uuid) -> Result<Option<Session>, AppError> {
        self.repo.find_by_id(session_id).await
    }

    /// Swap the stored refresh token for a new one and extend the session
    /// to the new token's expiry. Returns `false` if the presented token was
    /// no longer current.
    pub async fn rotate_refresh_token(
        &self,
        session_id: Uuid,
        presented: &str,
        replacement: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        self.repo
            .rotate_refresh_hash(
                session_id,
                &hash_token(presented),
                &hash_token(replacement),
                expires_at,
            )
            .await
    }

    /// Update the session's last-used timestamp.
    pub async fn touch(&self, session_id: Uuid) -> Result<(), AppError> {
        self.repo.touch(session_id).await
    }

    /// Revoke one session.
    pub async fn revoke(&self, session_id: Uuid, reason: &str) -> Result<bool, AppError> {
        self.repo.revoke(session_id, reason).await
    }

    /// Revoke all of a user's sessions except `keep`.
    pub async fn revoke_all_except(
        &self,
        user_id: Uuid,
        keep: Option<Uuid>,
        reason: &str,
    ) -> Result<u64, AppError> {
        self.repo
            .revoke_all_for_user_except(user_id, keep, reason)
            .await
    }

    /// Remove long-expired sessions.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        self.repo.delete_expired().await
    }
}

/// Hex-encoded SHA-256 of a token.
pub fn hash_token(token: &str) -> String {
    Sha256::digest(token.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Whether a presented token matches a stored hash.
pub fn token_matches(token: &str, stored_hash: Option<&str>) -> bool {
    stored_hash.is_some_and(|stored| stored == hash_token(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_hex_sha256() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash_token("anything").len(), 64);
    }

    #[test]
    fn test_token_matches() {
        let stored = hash_token("refresh-1");
        assert!(token_matches("refresh-1", Some(&stored)));
        assert!(!token_matches("refresh-2", Some(&stored)));
        assert!(!token_matches("refresh-1", None));
    }
}
