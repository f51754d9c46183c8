//! Comment repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use vidhub_core::error::{AppError, ErrorKind};
use vidhub_core::result::AppResult;
use vidhub_core::types::pagination::{PageRequest, PageResponse};
use vidhub_entity::comment::{Comment, CommentView};

use super::OWNER_COLUMNS;

/// Repository for video comments.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a comment by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    /// Page through a video's comments, newest first.
    pub async fn list_for_video(
        &self,
        video_id: Uuid,
        viewer_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<CommentView>> {
        let offset = page.offset()?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE video_id = $1")
            .bind(video_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count comments", e))?;

        let comments = sqlx::query_as::<_, CommentView>(&format!(
            "SELECT c.*, {OWNER_COLUMNS}, \
                    (SELECT COUNT(*) FROM likes l WHERE l.comment_id = c.id) AS likes_count, \
                    EXISTS (SELECT 1 FROM likes l \
                            WHERE l.comment_id = c.id AND l.liked_by = $2) AS is_liked \
             FROM comments c JOIN users u ON u.id = c.owner_id \
             WHERE c.video_id = $1 \
             ORDER BY c.created_at DESC, c.id \
             LIMIT $3 OFFSET $4"
        ))
        .bind(video_id)
        .bind(viewer_id)
        .bind(page.sql_limit())
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list comments", e))?;

        Ok(PageResponse::new(comments, page, total as u64))
    }

    /// Create a new comment.
    pub async fn create(&self, video_id: Uuid, owner_id: Uuid, content: &str) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (id, video_id, owner_id, content) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(video_id)
        .bind(owner_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create comment", e))
    }

    /// Replace a comment's content.
    pub async fn update_content(&self, id: Uuid, content: &str) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET content = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update comment", e))?
        .ok_or_else(|| AppError::not_found("Comment not found"))
    }

    /// Delete a comment. Likes on it are removed by cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete comment", e))?;

        Ok(result.rows_affected() > 0)
    }
}
