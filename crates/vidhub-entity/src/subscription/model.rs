//! Subscription entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::OwnerSummary;

/// A subscriber → channel relation. Both ends are users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    pub subscriber_id: Uuid,
    pub channel_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A subscriber of a channel.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    #[sqlx(flatten)]
    pub subscriber: OwnerSummary,
    pub subscribed_at: DateTime<Utc>,
}

/// The most recent published video of a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestVideo {
    pub id: Uuid,
    pub title: String,
    pub thumbnail: String,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}

/// Raw row of the subscribed-channels query. The latest video columns are
/// all null when the channel has no published video.
#[derive(Debug, Clone, FromRow)]
pub struct SubscribedChannelRow {
    #[sqlx(flatten)]
    pub channel: OwnerSummary,
    pub subscribers_count: i64,
    pub subscribed_at: DateTime<Utc>,
    pub latest_video_id: Option<Uuid>,
    pub latest_video_title: Option<String>,
    pub latest_video_thumbnail: Option<String>,
    pub latest_video_views: Option<i64>,
    pub latest_video_created_at: Option<DateTime<Utc>>,
}

/// A channel the user subscribes to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedChannel {
    pub channel: OwnerSummary,
    pub subscribers_count: i64,
    pub subscribed_at: DateTime<Utc>,
    pub latest_video: Option<LatestVideo>,
}

impl From<SubscribedChannelRow> for SubscribedChannel {
    fn from(row: SubscribedChannelRow) -> Self {
        let latest_video = match (
            row.latest_video_id,
            row.latest_video_title,
            row.latest_video_thumbnail,
            row.latest_video_created_at,
        ) {
            (Some(id), Some(title), Some(thumbnail), Some(created_at)) => Some(LatestVideo {
                id,
                title,
                thumbnail,
                views: row.latest_video_views.unwrap_or(0),
                created_at,
            }),
            _ => None,
        };
        Self {
            channel: row.channel,
            subscribers_count: row.subscribers_count,
            subscribed_at: row.subscribed_at,
            latest_video,
        }
    }
}
