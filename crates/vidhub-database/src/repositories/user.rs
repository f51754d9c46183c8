//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use vidhub_core::error::{AppError, ErrorKind};
use vidhub_core::result::AppResult;
use vidhub_entity::user::{ChannelProfile, CreateUser, OwnerSummary, User};
use vidhub_entity::video::WatchHistoryEntry;

use super::OWNER_COLUMNS;

/// Repository for users, channel profiles and watch history.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user whose email or user name equals the identifier
    /// (case-insensitive).
    pub async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = LOWER($1) OR user_name = LOWER($1) LIMIT 1",
        )
        .bind(identifier.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// Find any user holding the given email or user name.
    pub async fn find_by_email_or_user_name(
        &self,
        email: &str,
        user_name: &str,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1 OR user_name = $2 LIMIT 1")
            .bind(email)
            .bind(user_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to look up existing user", e)
            })
    }

    /// Public projection of a user.
    pub async fn find_summary(&self, id: Uuid) -> AppResult<Option<OwnerSummary>> {
        sqlx::query_as::<_, OwnerSummary>(&format!(
            "SELECT u.id AS owner_id, {OWNER_COLUMNS} FROM users u WHERE u.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load user summary", e))
    }

    /// Check whether a user exists.
    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check user", e))
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, full_name, email, user_name, avatar, cover_image, password_hash) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.user_name)
        .bind(&data.avatar)
        .bind(&data.cover_image)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if matches!(
                    db_err.constraint(),
                    Some("users_user_name_key" | "users_email_key")
                ) =>
            {
                AppError::conflict("User with email or username already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Update a user's full name and email.
    pub async fn update_account(&self, id: Uuid, full_name: &str, email: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET full_name = $2, email = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(full_name)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("Email already in use")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update account", e),
        })?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Update a user's password hash.
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }
        Ok(())
    }

    /// Replace the avatar URL.
    pub async fn update_avatar(&self, id: Uuid, avatar: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET avatar = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(avatar)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update avatar", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Replace the cover image URL.
    pub async fn update_cover_image(&self, id: Uuid, cover_image: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET cover_image = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(cover_image)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update cover image", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Load a channel profile by user name, with counters relative to `viewer_id`.
    pub async fn channel_profile(
        &self,
        user_name: &str,
        viewer_id: Uuid,
    ) -> AppResult<Option<ChannelProfile>> {
        sqlx::query_as::<_, ChannelProfile>(
            "SELECT u.id, u.full_name, u.user_name, u.email, u.avatar, u.cover_image, \
                    (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id) AS subscribers_count, \
                    (SELECT COUNT(*) FROM subscriptions s WHERE s.subscriber_id = u.id) AS channels_subscribed_to_count, \
                    EXISTS (SELECT 1 FROM subscriptions s \
                            WHERE s.channel_id = u.id AND s.subscriber_id = $2) AS is_subscribed \
             FROM users u WHERE u.user_name = LOWER($1)",
        )
        .bind(user_name.trim())
        .bind(viewer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load channel profile", e))
    }

    /// Record that a user watched a video, refreshing the timestamp of a
    /// previous entry.
    pub async fn record_watch(&self, user_id: Uuid, video_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO watch_history (user_id, video_id, watched_at) VALUES ($1, $2, NOW()) \
             ON CONFLICT (user_id, video_id) DO UPDATE SET watched_at = EXCLUDED.watched_at",
        )
        .bind(user_id)
        .bind(video_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record watch history", e))?;
        Ok(())
    }

    /// A user's watch history, most recent first. Videos unpublished since
    /// they were watched are hidden unless the user owns them.
    pub async fn watch_history(&self, user_id: Uuid) -> AppResult<Vec<WatchHistoryEntry>> {
        sqlx::query_as::<_, WatchHistoryEntry>(&format!(
            "SELECT v.*, {OWNER_COLUMNS}, wh.watched_at \
             FROM watch_history wh \
             JOIN videos v ON v.id = wh.video_id \
             JOIN users u ON u.id = v.owner_id \
             WHERE wh.user_id = $1 AND (v.is_published OR v.owner_id = $1) \
             ORDER BY wh.watched_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load watch history", e))
    }
}
