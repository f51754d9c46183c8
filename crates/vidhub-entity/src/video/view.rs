//! Joined video projections.
//!
//! Each projection flattens the base [`Video`] row and the owner's
//! [`OwnerSummary`], plus whatever computed columns the query adds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::model::Video;
use crate::user::OwnerSummary;

/// A video with its owner embedded. Used by listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VideoWithOwner {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub video: Video,
    #[sqlx(flatten)]
    pub owner: OwnerSummary,
}

/// A single video as seen by a specific viewer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub video: Video,
    #[sqlx(flatten)]
    pub owner: OwnerSummary,
    pub likes_count: i64,
    /// Whether the viewer liked the video.
    pub is_liked: bool,
    /// Subscribers of the owning channel.
    pub subscribers_count: i64,
    /// Whether the viewer subscribes to the owning channel.
    pub is_subscribed: bool,
}

/// An entry of a user's watch history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub video: Video,
    #[sqlx(flatten)]
    pub owner: OwnerSummary,
    pub watched_at: DateTime<Utc>,
}

/// A video liked by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LikedVideo {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub video: Video,
    #[sqlx(flatten)]
    pub owner: OwnerSummary,
    pub liked_at: DateTime<Utc>,
}

/// A video in a channel dashboard listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChannelVideo {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub video: Video,
    pub likes_count: i64,
    pub comments_count: i64,
}
