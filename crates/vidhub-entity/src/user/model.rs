//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user. Every user is also a channel.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub full_name: String,
    /// Email address, stored lowercase.
    pub email: String,
    /// Unique handle, stored lowercase.
    pub user_name: String,
    /// Public URL of the avatar image.
    pub avatar: String,
    /// Public URL of the channel cover image.
    pub cover_image: Option<String>,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Project the public identity embedded in other resources.
    pub fn summary(&self) -> OwnerSummary {
        OwnerSummary {
            id: self.id,
            full_name: self.full_name.clone(),
            user_name: self.user_name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name.
    pub full_name: String,
    /// Normalized (trimmed, lowercase) email.
    pub email: String,
    /// Normalized (trimmed, lowercase) handle.
    pub user_name: String,
    /// Avatar URL.
    pub avatar: String,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// Pre-hashed password.
    pub password_hash: String,
}

/// Public user projection embedded in videos, comments, tweets, playlists
/// and subscription listings.
///
/// Queries alias the joined user columns as `owner_id`, `owner_full_name`,
/// `owner_user_name` and `owner_avatar` so the projection can be flattened
/// into any row type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    #[sqlx(rename = "owner_id")]
    pub id: Uuid,
    #[sqlx(rename = "owner_full_name")]
    pub full_name: String,
    #[sqlx(rename = "owner_user_name")]
    pub user_name: String,
    #[sqlx(rename = "owner_avatar")]
    pub avatar: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            user_name: "ada".to_string(),
            avatar: "/media/avatars/a.png".to_string(),
            cover_image: None,
            password_hash: "$argon2id$secret".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["userName"], "ada");
        assert!(json["coverImage"].is_null());
    }

    #[test]
    fn test_summary_projection() {
        let user = sample_user();
        let summary = user.summary();
        assert_eq!(summary.id, user.id);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["fullName"], "Ada Lovelace");
        assert!(json.get("email").is_none());
    }
}
