//! Channel dashboard queries.

use sqlx::PgPool;
use uuid::Uuid;

use vidhub_core::error::{AppError, ErrorKind};
use vidhub_core::result::AppResult;
use vidhub_entity::dashboard::ChannelStats;
use vidhub_entity::video::ChannelVideo;

/// Read-only aggregate queries over a channel.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    /// Create a new dashboard repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Aggregate counters over all of a channel's videos.
    pub async fn channel_stats(&self, channel_id: Uuid) -> AppResult<ChannelStats> {
        sqlx::query_as::<_, ChannelStats>(
            "SELECT \
                (SELECT COUNT(*) FROM videos v WHERE v.owner_id = $1) AS total_videos, \
                (SELECT COALESCE(SUM(v.views), 0)::BIGINT FROM videos v \
                 WHERE v.owner_id = $1) AS total_views, \
                (SELECT COUNT(*) FROM likes l JOIN videos v ON v.id = l.video_id \
                 WHERE v.owner_id = $1) AS total_likes, \
                (SELECT COUNT(*) FROM subscriptions s \
                 WHERE s.channel_id = $1) AS total_subscribers",
        )
        .bind(channel_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load channel stats", e))
    }

    /// All of a channel's videos, newest first, with like and comment counts.
    pub async fn channel_videos(
        &self,
        channel_id: Uuid,
        include_unpublished: bool,
    ) -> AppResult<Vec<ChannelVideo>> {
        sqlx::query_as::<_, ChannelVideo>(
            "SELECT v.*, \
                    (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id) AS likes_count, \
                    (SELECT COUNT(*) FROM comments c WHERE c.video_id = v.id) AS comments_count \
             FROM videos v \
             WHERE v.owner_id = $1 AND (v.is_published OR $2) \
             ORDER BY v.created_at DESC, v.id",
        )
        .bind(channel_id)
        .bind(include_unpublished)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load channel videos", e))
    }
}
