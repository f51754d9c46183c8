//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use vidhub_auth::session::SessionManager;
use vidhub_core::config::AppConfig;
use vidhub_database::DatabasePool;
use vidhub_service::{
    CommentService, DashboardService, HealthService, LikeService, PlaylistService,
    SubscriptionService, TweetService, UserService, VideoService,
};
use vidhub_storage::MediaManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Media upload and deletion
    pub media: Arc<MediaManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,

    // ── Services ─────────────────────────────────────────────
    pub user_service: Arc<UserService>,
    pub video_service: Arc<VideoService>,
    pub comment_service: Arc<CommentService>,
    pub like_service: Arc<LikeService>,
    pub playlist_service: Arc<PlaylistService>,
    pub subscription_service: Arc<SubscriptionService>,
    pub tweet_service: Arc<TweetService>,
    pub dashboard_service: Arc<DashboardService>,
    pub health_service: Arc<HealthService>,
}
