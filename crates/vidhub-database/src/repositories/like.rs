//! Like repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use vidhub_core::error::{AppError, ErrorKind};
use vidhub_core::result::AppResult;
use vidhub_entity::like::LikeTarget;
use vidhub_entity::video::LikedVideo;

use super::OWNER_COLUMNS;

/// Repository for likes on videos, comments and tweets.
#[derive(Debug, Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    /// Create a new like repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Toggle a user's like on a target. Returns whether the target is
    /// liked afterwards.
    pub async fn toggle(&self, user_id: Uuid, target: LikeTarget) -> AppResult<bool> {
        let column = target.column();

        let removed = sqlx::query(&format!(
            "DELETE FROM likes WHERE liked_by = $1 AND {column} = $2"
        ))
        .bind(user_id)
        .bind(target.id())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove like", e))?;

        if removed.rows_affected() > 0 {
            return Ok(false);
        }

        sqlx::query(&format!(
            "INSERT INTO likes (id, liked_by, {column}) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING"
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(target.id())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add like", e))?;

        Ok(true)
    }

    /// Videos liked by a user, newest like first. Videos the user can no
    /// longer see are skipped.
    pub async fn liked_videos(&self, user_id: Uuid) -> AppResult<Vec<LikedVideo>> {
        sqlx::query_as::<_, LikedVideo>(&format!(
            "SELECT v.*, {OWNER_COLUMNS}, l.created_at AS liked_at \
             FROM likes l \
             JOIN videos v ON v.id = l.video_id \
             JOIN users u ON u.id = v.owner_id \
             WHERE l.liked_by = $1 AND (v.is_published OR v.owner_id = $1) \
             ORDER BY l.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load liked videos", e))
    }
}
