//! Session lifecycle manager: login, token refresh and logout.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use vidhub_core::error::AppError;
use vidhub_database::repositories::user::UserRepository;
use vidhub_entity::session::{Session, TokenPair};
use vidhub_entity::user::User;

use crate::jwt::{Claims, JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

use super::store::{SessionStore, token_matches};

const REUSED_REFRESH_TOKEN: &str = "Refresh token is expired or used";

/// Request metadata recorded on new sessions.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// Result of a successful login or refresh.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// Issued token pair.
    pub tokens: TokenPair,
    /// The session the tokens belong to.
    pub session_id: Uuid,
}

/// Manages the complete session lifecycle.
#[derive(Debug, Clone)]
pub struct SessionManager {
    jwt_encoder: Arc<JwtEncoder>,
    jwt_decoder: Arc<JwtDecoder>,
    session_store: Arc<SessionStore>,
    user_repo: Arc<UserRepository>,
    password_hasher: Arc<PasswordHasher>,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        session_store: Arc<SessionStore>,
        user_repo: Arc<UserRepository>,
        password_hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            session_store,
            user_repo,
            password_hasher,
        }
    }

    /// Authenticate by email or user name and open a new session.
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
        client: ClientInfo,
    ) -> Result<LoginResult, AppError> {
        let user = self
            .user_repo
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid credentials"))?;

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::authentication("Invalid credentials"));
        }

        let session_id = Uuid::new_v4();
        let tokens = self.jwt_encoder.generate_token_pair(&user, session_id)?;
        self.session_store
            .create_session(
                session_id,
                user.id,
                &tokens.refresh_token,
                tokens.refresh_expires_at,
                client.user_agent.as_deref(),
                client.ip_address.as_deref(),
            )
            .await?;

        info!(user_id = %user.id, session_id = %session_id, "Login successful");

        Ok(LoginResult {
            user,
            tokens,
            session_id,
        })
    }

    /// Redeem a refresh token for a new token pair.
    ///
    /// Each refresh token is accepted at most once. Presenting a token that
    /// was already rotated out revokes the whole session.
    pub async fn refresh(&self, refresh_token: &str) -> Result<LoginResult, AppError> {
        let claims = self.jwt_decoder.decode_refresh_token(refresh_token)?;
        let session_id = claims.session_id();

        let session = self
            .session_store
            .find_by_id(session_id)
            .await?
            .filter(|s| s.user_id == claims.user_id())
            .ok_or_else(|| AppError::authentication("Invalid refresh token"))?;

        if !session.is_active() {
            return Err(AppError::authentication(REUSED_REFRESH_TOKEN));
        }

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Invalid refresh token"))?;

        if !token_matches(refresh_token, session.refresh_token_hash.as_deref()) {
            self.revoke_for_reuse(session_id, user.id).await?;
            return Err(AppError::authentication(REUSED_REFRESH_TOKEN));
        }

        let tokens = self.jwt_encoder.generate_token_pair(&user, session_id)?;
        let rotated = self
            .session_store
            .rotate_refresh_token(
                session_id,
                refresh_token,
                &tokens.refresh_token,
                tokens.refresh_expires_at,
            )
            .await?;
        if !rotated {
            self.revoke_for_reuse(session_id, user.id).await?;
            return Err(AppError::authentication(REUSED_REFRESH_TOKEN));
        }

        info!(user_id = %user.id, session_id = %session_id, "Token refreshed");

        Ok(LoginResult {
            user,
            tokens,
            session_id,
        })
    }

    /// End a session. Both of its tokens stop being accepted.
    pub async fn logout(&self, session_id: Uuid) -> Result<(), AppError> {
        self.session_store.revoke(session_id, "logout").await?;
        info!(session_id = %session_id, "Logout completed");
        Ok(())
    }

    /// Decode an access token and check that its session is still usable.
    pub async fn authenticate(&self, access_token: &str) -> Result<Claims, AppError> {
        let claims = self.jwt_decoder.decode_access_token(access_token)?;
        self.validate_session(&claims).await?;
        Ok(claims)
    }

    /// Check that the session named by the claims exists, belongs to the
    /// subject, and is neither revoked nor expired.
    pub async fn validate_session(&self, claims: &Claims) -> Result<Session, AppError> {
        let session = self
            .session_store
            .find_by_id(claims.session_id())
            .await?
            .filter(|s| s.user_id == claims.user_id())
            .ok_or_else(|| AppError::authentication("Invalid access token"))?;

        if session.is_revoked() {
            return Err(AppError::authentication("Session has been revoked"));
        }
        if session.is_expired() {
            return Err(AppError::authentication("Session has expired"));
        }

        self.session_store.touch(session.id).await?;
        Ok(session)
    }

    /// Revoke every session of the user except `keep`.
    pub async fn revoke_other_sessions(&self, user_id: Uuid, keep: Uuid) -> Result<u64, AppError> {
        let revoked = self
            .session_store
            .revoke_all_except(user_id, Some(keep), "password changed")
            .await?;
        info!(user_id = %user_id, revoked, "Revoked other sessions");
        Ok(revoked)
    }

    /// Remove long-expired sessions.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        self.session_store.purge_expired().await
    }

    async fn revoke_for_reuse(&self, session_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        warn!(
            user_id = %user_id,
            session_id = %session_id,
            "Refresh token reuse detected, revoking session"
        );
        self.session_store
            .revoke(session_id, "refresh token reuse")
            .await?;
        Ok(())
    }
}
