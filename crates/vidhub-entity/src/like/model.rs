//! Like entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A like by a user on exactly one of a video, a comment or a tweet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: Uuid,
    pub liked_by: Uuid,
    pub video_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub tweet_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Like {
    /// The resource this like points at.
    pub fn target(&self) -> Option<LikeTarget> {
        match (self.video_id, self.comment_id, self.tweet_id) {
            (Some(id), None, None) => Some(LikeTarget::Video(id)),
            (None, Some(id), None) => Some(LikeTarget::Comment(id)),
            (None, None, Some(id)) => Some(LikeTarget::Tweet(id)),
            _ => None,
        }
    }
}

/// The target of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeTarget {
    Video(Uuid),
    Comment(Uuid),
    Tweet(Uuid),
}

impl LikeTarget {
    /// The target's id.
    pub fn id(&self) -> Uuid {
        match self {
            Self::Video(id) | Self::Comment(id) | Self::Tweet(id) => *id,
        }
    }

    /// The `likes` column referencing this kind of target.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Video(_) => "video_id",
            Self::Comment(_) => "comment_id",
            Self::Tweet(_) => "tweet_id",
        }
    }

    /// Human-readable name of the target kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Video(_) => "Video",
            Self::Comment(_) => "Comment",
            Self::Tweet(_) => "Tweet",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_row() {
        let video_id = Uuid::new_v4();
        let like = Like {
            id: Uuid::new_v4(),
            liked_by: Uuid::new_v4(),
            video_id: Some(video_id),
            comment_id: None,
            tweet_id: None,
            created_at: Utc::now(),
        };
        assert_eq!(like.target(), Some(LikeTarget::Video(video_id)));
    }

    #[test]
    fn test_target_columns() {
        let id = Uuid::new_v4();
        assert_eq!(LikeTarget::Video(id).column(), "video_id");
        assert_eq!(LikeTarget::Comment(id).column(), "comment_id");
        assert_eq!(LikeTarget::Tweet(id).column(), "tweet_id");
        assert_eq!(LikeTarget::Tweet(id).id(), id);
    }
}
