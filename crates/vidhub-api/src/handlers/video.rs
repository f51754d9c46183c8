//! Video handlers.

use axum::extract::State;

use vidhub_core::types::pagination::{DEFAULT_LIMIT, PageRequest, PageResponse};
use vidhub_entity::video::{Video, VideoDetail, VideoWithOwner};
use vidhub_service::{PublishVideoInput, UpdateVideoInput, VideoListQuery};

use crate::dto::request::VideoListParams;
use crate::dto::{ApiResponse, Empty};
use crate::error::ApiError;
use crate::extractors::{AppPath, AppQuery, AuthUser, MultipartForm, parse_id};
use crate::state::AppState;

/// GET /api/v1/videos
pub async fn list_videos(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(params): AppQuery<VideoListParams>,
) -> Result<ApiResponse<PageResponse<VideoWithOwner>>, ApiError> {
    let user_id = params
        .user_id
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_id(s, "user"))
        .transpose()?;

    let page = state
        .video_service
        .list(
            &auth,
            VideoListQuery {
                page: PageRequest::new(
                    params.page.unwrap_or(1),
                    params.limit.unwrap_or(DEFAULT_LIMIT),
                ),
                query: params.query,
                sort_by: params.sort_by,
                sort_type: params.sort_type,
                user_id,
            },
        )
        .await?;
    Ok(ApiResponse::ok(page, "Videos fetched successfully"))
}

/// POST /api/v1/videos (multipart)
pub async fn publish_video(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> Result<ApiResponse<Video>, ApiError> {
    let input = PublishVideoInput {
        title: form.text("title"),
        description: form.text("description"),
        duration: form.number("duration")?,
        video_file: form.take_file("videoFile"),
        thumbnail: form.take_file("thumbnail"),
    };

    let video = state.video_service.publish(&auth, input).await?;
    Ok(ApiResponse::created(video, "Video uploaded successfully"))
}

/// GET /api/v1/videos/{video_id}
pub async fn get_video(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(video_id): AppPath<String>,
) -> Result<ApiResponse<VideoDetail>, ApiError> {
    let video_id = parse_id(&video_id, "video")?;
    let video = state.video_service.view(&auth, video_id).await?;
    Ok(ApiResponse::ok(video, "Video found"))
}

/// PATCH /api/v1/videos/{video_id} (multipart)
pub async fn update_video(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(video_id): AppPath<String>,
    mut form: MultipartForm,
) -> Result<ApiResponse<Video>, ApiError> {
    let video_id = parse_id(&video_id, "video")?;
    let input = UpdateVideoInput {
        title: form.text("title"),
        description: form.text("description"),
        thumbnail: form.take_file("thumbnail"),
    };

    let video = state.video_service.update(&auth, video_id, input).await?;
    Ok(ApiResponse::ok(video, "Video updated successfully"))
}

/// DELETE /api/v1/videos/{video_id}
pub async fn delete_video(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(video_id): AppPath<String>,
) -> Result<ApiResponse<Empty>, ApiError> {
    let video_id = parse_id(&video_id, "video")?;
    state.video_service.delete(&auth, video_id).await?;
    Ok(ApiResponse::ok(Empty {}, "Video deleted successfully"))
}

/// PATCH /api/v1/videos/toggle/publish/{video_id}
pub async fn toggle_publish(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(video_id): AppPath<String>,
) -> Result<ApiResponse<Video>, ApiError> {
    let video_id = parse_id(&video_id, "video")?;
    let video = state.video_service.toggle_publish(&auth, video_id).await?;
    Ok(ApiResponse::ok(video, "Publish status updated successfully"))
}
