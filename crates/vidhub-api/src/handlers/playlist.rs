//! Playlist handlers.

use axum::extract::State;

use vidhub_entity::playlist::{Playlist, PlaylistDetail, PlaylistSummary};

use crate::dto::request::PlaylistRequest;
use crate::dto::{ApiResponse, Empty, validate_request};
use crate::error::ApiError;
use crate::extractors::{AppJson, AppPath, AuthUser, parse_id};
use crate::state::AppState;

/// POST /api/v1/playlist
pub async fn create_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<PlaylistRequest>,
) -> Result<ApiResponse<Playlist>, ApiError> {
    validate_request(&req)?;
    let playlist = state
        .playlist_service
        .create(&auth, req.name.as_deref(), req.description.as_deref())
        .await?;
    Ok(ApiResponse::created(playlist, "Playlist created successfully"))
}

/// GET /api/v1/playlist/user/{user_id}
pub async fn user_playlists(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(user_id): AppPath<String>,
) -> Result<ApiResponse<Vec<PlaylistSummary>>, ApiError> {
    let user_id = parse_id(&user_id, "user")?;
    let playlists = state.playlist_service.user_playlists(&auth, user_id).await?;
    Ok(ApiResponse::ok(playlists, "Playlists fetched successfully"))
}

/// GET /api/v1/playlist/{playlist_id}
pub async fn get_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(playlist_id): AppPath<String>,
) -> Result<ApiResponse<PlaylistDetail>, ApiError> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let playlist = state.playlist_service.get(&auth, playlist_id).await?;
    Ok(ApiResponse::ok(playlist, "Playlist fetched successfully"))
}

/// PATCH /api/v1/playlist/add/{video_id}/{playlist_id}
pub async fn add_video(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((video_id, playlist_id)): AppPath<(String, String)>,
) -> Result<ApiResponse<PlaylistSummary>, ApiError> {
    let video_id = parse_id(&video_id, "video")?;
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let playlist = state
        .playlist_service
        .add_video(&auth, playlist_id, video_id)
        .await?;
    Ok(ApiResponse::ok(playlist, "Video added to playlist successfully"))
}

/// PATCH /api/v1/playlist/remove/{video_id}/{playlist_id}
pub async fn remove_video(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((video_id, playlist_id)): AppPath<(String, String)>,
) -> Result<ApiResponse<PlaylistSummary>, ApiError> {
    let video_id = parse_id(&video_id, "video")?;
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let playlist = state
        .playlist_service
        .remove_video(&auth, playlist_id, video_id)
        .await?;
    Ok(ApiResponse::ok(
        playlist,
        "Video removed from playlist successfully",
    ))
}

/// PATCH /api/v1/playlist/{playlist_id}
pub async fn update_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(playlist_id): AppPath<String>,
    AppJson(req): AppJson<PlaylistRequest>,
) -> Result<ApiResponse<Playlist>, ApiError> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    validate_request(&req)?;
    let playlist = state
        .playlist_service
        .update(
            &auth,
            playlist_id,
            req.name.as_deref(),
            req.description.as_deref(),
        )
        .await?;
    Ok(ApiResponse::ok(playlist, "Playlist updated successfully"))
}

/// DELETE /api/v1/playlist/{playlist_id}
pub async fn delete_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(playlist_id): AppPath<String>,
) -> Result<ApiResponse<Empty>, ApiError> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    state.playlist_service.delete(&auth, playlist_id).await?;
    Ok(ApiResponse::ok(Empty {}, "Playlist deleted successfully"))
}
