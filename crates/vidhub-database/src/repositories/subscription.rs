//! Subscription repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use vidhub_core::error::{AppError, ErrorKind};
use vidhub_core::result::AppResult;
use vidhub_entity::subscription::{SubscribedChannel, SubscribedChannelRow, Subscriber};

use super::OWNER_COLUMNS;

/// Repository for channel subscriptions.
#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    /// Create a new subscription repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Toggle a subscription. Returns whether the subscriber is subscribed
    /// afterwards.
    pub async fn toggle(&self, subscriber_id: Uuid, channel_id: Uuid) -> AppResult<bool> {
        let removed =
            sqlx::query("DELETE FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2")
                .bind(subscriber_id)
                .bind(channel_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to unsubscribe", e)
                })?;

        if removed.rows_affected() > 0 {
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO subscriptions (id, subscriber_id, channel_id) VALUES ($1, $2, $3) \
             ON CONFLICT (subscriber_id, channel_id) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(subscriber_id)
        .bind(channel_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to subscribe", e))?;

        Ok(true)
    }

    /// Subscribers of a channel, newest first.
    pub async fn subscribers(&self, channel_id: Uuid) -> AppResult<Vec<Subscriber>> {
        sqlx::query_as::<_, Subscriber>(&format!(
            "SELECT u.id AS owner_id, {OWNER_COLUMNS}, s.created_at AS subscribed_at \
             FROM subscriptions s JOIN users u ON u.id = s.subscriber_id \
             WHERE s.channel_id = $1 \
             ORDER BY s.created_at DESC"
        ))
        .bind(channel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list subscribers", e))
    }

    /// Channels a user subscribes to, newest subscription first, each with
    /// its subscriber count and latest published video.
    pub async fn subscribed_channels(&self, subscriber_id: Uuid) -> AppResult<Vec<SubscribedChannel>> {
        let rows = sqlx::query_as::<_, SubscribedChannelRow>(&format!(
            "SELECT u.id AS owner_id, {OWNER_COLUMNS}, \
                    s.created_at AS subscribed_at, \
                    (SELECT COUNT(*) FROM subscriptions cs \
                     WHERE cs.channel_id = u.id) AS subscribers_count, \
                    lv.id AS latest_video_id, \
                    lv.title AS latest_video_title, \
                    lv.thumbnail AS latest_video_thumbnail, \
                    lv.views AS latest_video_views, \
                    lv.created_at AS latest_video_created_at \
             FROM subscriptions s \
             JOIN users u ON u.id = s.channel_id \
             LEFT JOIN LATERAL ( \
                 SELECT v.id, v.title, v.thumbnail, v.views, v.created_at \
                 FROM videos v \
                 WHERE v.owner_id = u.id AND v.is_published \
                 ORDER BY v.created_at DESC LIMIT 1 \
             ) lv ON TRUE \
             WHERE s.subscriber_id = $1 \
             ORDER BY s.created_at DESC"
        ))
        .bind(subscriber_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list subscribed channels", e)
        })?;

        Ok(rows.into_iter().map(SubscribedChannel::from).collect())
    }
}
