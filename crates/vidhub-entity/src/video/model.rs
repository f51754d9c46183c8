//! Video entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An uploaded video.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Unique video identifier.
    pub id: Uuid,
    /// The channel (user) that published the video.
    pub owner_id: Uuid,
    /// Public URL of the video file.
    pub video_file: String,
    /// Public URL of the thumbnail image.
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    /// Duration in seconds.
    pub duration: f64,
    /// View counter.
    pub views: i64,
    /// Unpublished videos are only visible to their owner.
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Whether the given user owns this video.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Whether the given viewer may see this video.
    pub fn is_visible_to(&self, viewer_id: Uuid) -> bool {
        self.is_published || self.is_owned_by(viewer_id)
    }
}

/// Data required to create a new video.
#[derive(Debug, Clone)]
pub struct CreateVideo {
    pub owner_id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
}

/// Partial update of a video's details. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

impl UpdateVideo {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.thumbnail.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(published: bool) -> Video {
        let now = Utc::now();
        Video {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            video_file: "/media/videos/v.mp4".to_string(),
            thumbnail: "/media/thumbnails/t.png".to_string(),
            title: "Title".to_string(),
            description: "Description".to_string(),
            duration: 12.5,
            views: 0,
            is_published: published,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_unpublished_visible_only_to_owner() {
        let v = video(false);
        assert!(v.is_visible_to(v.owner_id));
        assert!(!v.is_visible_to(Uuid::new_v4()));
        assert!(video(true).is_visible_to(Uuid::new_v4()));
    }

    #[test]
    fn test_update_is_empty() {
        assert!(UpdateVideo::default().is_empty());
        let update = UpdateVideo {
            title: Some("New".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
