//! Tweet repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use vidhub_core::error::{AppError, ErrorKind};
use vidhub_core::result::AppResult;
use vidhub_entity::tweet::{Tweet, TweetView};

use super::OWNER_COLUMNS;

/// Repository for tweets.
#[derive(Debug, Clone)]
pub struct TweetRepository {
    pool: PgPool,
}

impl TweetRepository {
    /// Create a new tweet repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a tweet by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tweet>> {
        sqlx::query_as::<_, Tweet>("SELECT * FROM tweets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tweet", e))
    }

    /// A user's tweets, newest first, with like counters relative to `viewer_id`.
    pub async fn list_by_owner(&self, owner_id: Uuid, viewer_id: Uuid) -> AppResult<Vec<TweetView>> {
        sqlx::query_as::<_, TweetView>(&format!(
            "SELECT t.*, {OWNER_COLUMNS}, \
                    (SELECT COUNT(*) FROM likes l WHERE l.tweet_id = t.id) AS likes_count, \
                    EXISTS (SELECT 1 FROM likes l \
                            WHERE l.tweet_id = t.id AND l.liked_by = $2) AS is_liked \
             FROM tweets t JOIN users u ON u.id = t.owner_id \
             WHERE t.owner_id = $1 \
             ORDER BY t.created_at DESC, t.id"
        ))
        .bind(owner_id)
        .bind(viewer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tweets", e))
    }

    /// Create a new tweet.
    pub async fn create(&self, owner_id: Uuid, content: &str) -> AppResult<Tweet> {
        sqlx::query_as::<_, Tweet>(
            "INSERT INTO tweets (id, owner_id, content) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create tweet", e))
    }

    /// Replace a tweet's content.
    pub async fn update_content(&self, id: Uuid, content: &str) -> AppResult<Tweet> {
        sqlx::query_as::<_, Tweet>(
            "UPDATE tweets SET content = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update tweet", e))?
        .ok_or_else(|| AppError::not_found("Tweet not found"))
    }

    /// Delete a tweet. Likes on it are removed by cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tweets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tweet", e))?;

        Ok(result.rows_affected() > 0)
    }
}
