//! Channel dashboard handlers.

use axum::extract::State;

use vidhub_entity::dashboard::ChannelStats;
use vidhub_entity::video::ChannelVideo;

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AppPath, AuthUser, parse_id};
use crate::state::AppState;

/// GET /api/v1/dashboard/stats/{channel_id}
pub async fn channel_stats(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppPath(channel_id): AppPath<String>,
) -> Result<ApiResponse<ChannelStats>, ApiError> {
    let channel_id = parse_id(&channel_id, "channel")?;
    let stats = state.dashboard_service.stats(channel_id).await?;
    Ok(ApiResponse::ok(stats, "Channel stats fetched successfully"))
}

/// GET /api/v1/dashboard/videos/{channel_id}
pub async fn channel_videos(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(channel_id): AppPath<String>,
) -> Result<ApiResponse<Vec<ChannelVideo>>, ApiError> {
    let channel_id = parse_id(&channel_id, "channel")?;
    let videos = state.dashboard_service.videos(&auth, channel_id).await?;
    Ok(ApiResponse::ok(videos, "Channel videos fetched successfully"))
}
