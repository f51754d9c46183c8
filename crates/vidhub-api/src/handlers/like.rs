//! Like handlers.

use axum::extract::State;

use vidhub_entity::like::LikeTarget;
use vidhub_service::LikedVideos;

use crate::dto::ApiResponse;
use crate::dto::response::LikeStatus;
use crate::error::ApiError;
use crate::extractors::{AppPath, AuthUser, parse_id};
use crate::state::AppState;

async fn toggle(
    state: &AppState,
    auth: &AuthUser,
    target: LikeTarget,
) -> Result<ApiResponse<LikeStatus>, ApiError> {
    let is_liked = state.like_service.toggle(auth, target).await?;
    let verb = if is_liked { "liked" } else { "unliked" };
    Ok(ApiResponse::ok(
        LikeStatus { is_liked },
        format!("{} {verb} successfully", target.label()),
    ))
}

/// POST /api/v1/likes/toggle/v/{video_id}
pub async fn toggle_video_like(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(video_id): AppPath<String>,
) -> Result<ApiResponse<LikeStatus>, ApiError> {
    let target = LikeTarget::Video(parse_id(&video_id, "video")?);
    toggle(&state, &auth, target).await
}

/// POST /api/v1/likes/toggle/c/{comment_id}
pub async fn toggle_comment_like(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(comment_id): AppPath<String>,
) -> Result<ApiResponse<LikeStatus>, ApiError> {
    let target = LikeTarget::Comment(parse_id(&comment_id, "comment")?);
    toggle(&state, &auth, target).await
}

/// POST /api/v1/likes/toggle/t/{tweet_id}
pub async fn toggle_tweet_like(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(tweet_id): AppPath<String>,
) -> Result<ApiResponse<LikeStatus>, ApiError> {
    let target = LikeTarget::Tweet(parse_id(&tweet_id, "tweet")?);
    toggle(&state, &auth, target).await
}

/// GET /api/v1/likes/videos
pub async fn liked_videos(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<ApiResponse<LikedVideos>, ApiError> {
    let liked = state.like_service.liked_videos(&auth).await?;
    Ok(ApiResponse::ok(liked, "Liked videos fetched successfully"))
}
