//! Route definitions for the VidHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api/v1`.
//! Multipart routes get the upload body limit; everything else the JSON limit.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{MethodRouter, get, patch, post},
};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let json_limit = state.config.server.json_limit_bytes;
    let upload_limit = state.config.server.max_upload_bytes;

    let api_routes = Router::new()
        .nest("/users", user_routes(upload_limit))
        .nest("/videos", video_routes(upload_limit))
        .nest("/comments", comment_routes())
        .nest("/likes", like_routes())
        .nest("/playlist", playlist_routes())
        .nest("/subscriptions", subscription_routes())
        .nest("/tweets", tweet_routes())
        .nest("/dashboard", dashboard_routes())
        .route("/healthcheck", get(handlers::health::healthcheck));

    let mut router = Router::new()
        .route("/", get(handlers::health::welcome))
        .nest("/api/v1", api_routes);

    let media_prefix = state.config.storage.public_base_url.trim_end_matches('/');
    if media_prefix.starts_with('/') && media_prefix.len() > 1 {
        router = router.nest_service(
            media_prefix,
            ServeDir::new(&state.config.storage.root_path),
        );
    } else {
        warn!(
            public_base_url = %state.config.storage.public_base_url,
            "Media URL prefix is not a local path; static media serving disabled"
        );
    }

    router
        .layer(DefaultBodyLimit::max(json_limit))
        .with_state(state)
}

/// Apply the upload body limit to a multipart route.
fn upload(route: MethodRouter<AppState>, limit: usize) -> MethodRouter<AppState> {
    route.layer(DefaultBodyLimit::max(limit))
}

/// Registration, session lifecycle and account endpoints
fn user_routes(upload_limit: usize) -> Router<AppState> {
    use handlers::user;
    Router::new()
        .route("/register", upload(post(user::register), upload_limit))
        .route("/login", post(user::login))
        .route("/logout", post(user::logout))
        .route("/refresh-token", post(user::refresh_token))
        .route("/change-password", post(user::change_password))
        .route("/current-user", get(user::current_user))
        .route("/update-account", patch(user::update_account))
        .route("/avatar", upload(patch(user::update_avatar), upload_limit))
        .route(
            "/cover-image",
            upload(patch(user::update_cover_image), upload_limit),
        )
        .route("/c/{user_name}", get(user::channel_profile))
        .route("/history", get(user::watch_history))
}

/// Video listing, publishing and ownership-guarded mutations
fn video_routes(upload_limit: usize) -> Router<AppState> {
    use handlers::video;
    Router::new()
        .route(
            "/",
            get(video::list_videos).merge(upload(post(video::publish_video), upload_limit)),
        )
        .route(
            "/{video_id}",
            get(video::get_video)
                .delete(video::delete_video)
                .merge(upload(patch(video::update_video), upload_limit)),
        )
        .route("/toggle/publish/{video_id}", patch(video::toggle_publish))
}

fn comment_routes() -> Router<AppState> {
    use handlers::comment;
    Router::new()
        .route(
            "/{video_id}",
            get(comment::list_comments).post(comment::add_comment),
        )
        .route(
            "/c/{comment_id}",
            patch(comment::update_comment).delete(comment::delete_comment),
        )
}

fn like_routes() -> Router<AppState> {
    use handlers::like;
    Router::new()
        .route("/toggle/v/{video_id}", post(like::toggle_video_like))
        .route("/toggle/c/{comment_id}", post(like::toggle_comment_like))
        .route("/toggle/t/{tweet_id}", post(like::toggle_tweet_like))
        .route("/videos", get(like::liked_videos))
}

fn playlist_routes() -> Router<AppState> {
    use handlers::playlist;
    Router::new()
        .route("/", post(playlist::create_playlist))
        .route("/user/{user_id}", get(playlist::user_playlists))
        .route(
            "/{playlist_id}",
            get(playlist::get_playlist)
                .patch(playlist::update_playlist)
                .delete(playlist::delete_playlist),
        )
        .route("/add/{video_id}/{playlist_id}", patch(playlist::add_video))
        .route(
            "/remove/{video_id}/{playlist_id}",
            patch(playlist::remove_video),
        )
}

fn subscription_routes() -> Router<AppState> {
    use handlers::subscription;
    Router::new()
        .route(
            "/c/{channel_id}",
            get(subscription::channel_subscribers).post(subscription::toggle_subscription),
        )
        .route("/u/{subscriber_id}", get(subscription::subscribed_channels))
}

fn tweet_routes() -> Router<AppState> {
    use handlers::tweet;
    Router::new()
        .route("/", post(tweet::create_tweet))
        .route("/user/{user_id}", get(tweet::user_tweets))
        .route(
            "/{tweet_id}",
            patch(tweet::update_tweet).delete(tweet::delete_tweet),
        )
}

fn dashboard_routes() -> Router<AppState> {
    use handlers::dashboard;
    Router::new()
        .route("/stats/{channel_id}", get(dashboard::channel_stats))
        .route("/videos/{channel_id}", get(dashboard::channel_videos))
}
