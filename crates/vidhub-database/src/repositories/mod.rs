//! Repository implementations for all VidHub entities.

pub mod comment;
pub mod dashboard;
pub mod like;
pub mod playlist;
pub mod session;
pub mod subscription;
pub mod tweet;
pub mod user;
pub mod video;

pub use comment::CommentRepository;
pub use dashboard::DashboardRepository;
pub use like::LikeRepository;
pub use playlist::PlaylistRepository;
pub use session::SessionRepository;
pub use subscription::SubscriptionRepository;
pub use tweet::TweetRepository;
pub use user::UserRepository;
pub use video::{VideoListFilter, VideoRepository};

/// Owner projection columns for a query joining `users u`.
///
/// The owner id is taken from the joined row's own `owner_id` column.
pub(crate) const OWNER_COLUMNS: &str =
    "u.full_name AS owner_full_name, u.user_name AS owner_user_name, u.avatar AS owner_avatar";

/// Build an `ILIKE` pattern matching `term` as a literal substring.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("rust"), "%rust%");
        assert_eq!(contains_pattern("100%_done"), "%100\\%\\_done%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
