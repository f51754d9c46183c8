//! Video repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use vidhub_core::error::{AppError, ErrorKind};
use vidhub_core::result::AppResult;
use vidhub_core::types::pagination::{PageRequest, PageResponse};
use vidhub_core::types::sorting::SortField;
use vidhub_entity::video::{CreateVideo, UpdateVideo, Video, VideoDetail, VideoWithOwner};

use super::{OWNER_COLUMNS, contains_pattern};

/// Sortable video fields: wire name to SQL column.
pub const VIDEO_SORT_FIELDS: &[(&str, &str)] = &[
    ("createdAt", "v.created_at"),
    ("views", "v.views"),
    ("duration", "v.duration"),
    ("title", "v.title"),
];

/// Default video sort column.
pub const DEFAULT_VIDEO_SORT: &str = "v.created_at";

/// Filter for the video listing.
#[derive(Debug, Clone)]
pub struct VideoListFilter {
    /// Case-insensitive substring matched against title and description.
    pub search: Option<String>,
    /// Restrict to one channel.
    pub owner_id: Option<Uuid>,
    /// Also return unpublished videos.
    pub include_unpublished: bool,
    /// Whitelisted sort column and direction.
    pub sort: SortField,
}

/// Repository for videos.
#[derive(Debug, Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    /// Create a new video repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a video by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Video>> {
        sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find video", e))
    }

    /// Load a video with its owner and counters relative to `viewer_id`.
    pub async fn find_detail(&self, id: Uuid, viewer_id: Uuid) -> AppResult<Option<VideoDetail>> {
        sqlx::query_as::<_, VideoDetail>(&format!(
            "SELECT v.*, {OWNER_COLUMNS}, \
                    (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id) AS likes_count, \
                    EXISTS (SELECT 1 FROM likes l \
                            WHERE l.video_id = v.id AND l.liked_by = $2) AS is_liked, \
                    (SELECT COUNT(*) FROM subscriptions s \
                     WHERE s.channel_id = v.owner_id) AS subscribers_count, \
                    EXISTS (SELECT 1 FROM subscriptions s \
                            WHERE s.channel_id = v.owner_id AND s.subscriber_id = $2) AS is_subscribed \
             FROM videos v JOIN users u ON u.id = v.owner_id \
             WHERE v.id = $1"
        ))
        .bind(id)
        .bind(viewer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load video", e))
    }

    /// List videos matching the filter, with owner projection.
    pub async fn list(
        &self,
        filter: &VideoListFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<VideoWithOwner>> {
        const WHERE: &str = "WHERE ($1::uuid IS NULL OR v.owner_id = $1) \
                               AND (v.is_published OR $2) \
                               AND ($3::text IS NULL OR v.title ILIKE $3 OR v.description ILIKE $3)";

        let offset = page.offset()?;

        let pattern = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(contains_pattern);

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM videos v {WHERE}"))
            .bind(filter.owner_id)
            .bind(filter.include_unpublished)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count videos", e))?;

        let videos = sqlx::query_as::<_, VideoWithOwner>(&format!(
            "SELECT v.*, {OWNER_COLUMNS} \
             FROM videos v JOIN users u ON u.id = v.owner_id \
             {WHERE} \
             ORDER BY {}, v.id LIMIT $4 OFFSET $5",
            filter.sort.to_sql()
        ))
        .bind(filter.owner_id)
        .bind(filter.include_unpublished)
        .bind(&pattern)
        .bind(page.sql_limit())
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list videos", e))?;

        Ok(PageResponse::new(videos, page, total as u64))
    }

    /// Create a new video.
    pub async fn create(&self, data: &CreateVideo) -> AppResult<Video> {
        sqlx::query_as::<_, Video>(
            "INSERT INTO videos (id, owner_id, video_file, thumbnail, title, description, duration) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.owner_id)
        .bind(&data.video_file)
        .bind(&data.thumbnail)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.duration)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create video", e))
    }

    /// Apply a partial update.
    pub async fn update(&self, id: Uuid, data: &UpdateVideo) -> AppResult<Video> {
        sqlx::query_as::<_, Video>(
            "UPDATE videos SET title = COALESCE($2, title), \
                               description = COALESCE($3, description), \
                               thumbnail = COALESCE($4, thumbnail), \
                               updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.thumbnail)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update video", e))?
        .ok_or_else(|| AppError::not_found("Video not found"))
    }

    /// Flip the published flag.
    pub async fn toggle_publish(&self, id: Uuid) -> AppResult<Video> {
        sqlx::query_as::<_, Video>(
            "UPDATE videos SET is_published = NOT is_published, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to toggle publish status", e))?
        .ok_or_else(|| AppError::not_found("Video not found"))
    }

    /// Increment the view counter.
    pub async fn increment_views(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE videos SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to increment views", e))?;
        Ok(())
    }

    /// Delete a video. Likes, comments, playlist entries and watch history
    /// rows are removed by cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete video", e))?;

        Ok(result.rows_affected() > 0)
    }
}
