//! Channel profile projection.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user viewed as a channel, with subscription counters relative to the
/// viewer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    pub id: Uuid,
    pub full_name: String,
    pub user_name: String,
    pub email: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    /// Number of users subscribed to this channel.
    pub subscribers_count: i64,
    /// Number of channels this user subscribes to.
    pub channels_subscribed_to_count: i64,
    /// Whether the viewer subscribes to this channel.
    pub is_subscribed: bool,
}
