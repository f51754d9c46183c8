//! Tweet entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::OwnerSummary;

/// A short text post on a channel.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A tweet with its author and like counters relative to the viewer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TweetView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub tweet: Tweet,
    #[sqlx(flatten)]
    pub owner: OwnerSummary,
    pub likes_count: i64,
    pub is_liked: bool,
}
