//! Channel dashboard projections.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Aggregate counters for a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub total_videos: i64,
    pub total_views: i64,
    /// Likes across all of the channel's videos.
    pub total_likes: i64,
    pub total_subscribers: i64,
}
