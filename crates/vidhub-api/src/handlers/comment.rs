//! Comment handlers.

use axum::extract::State;

use vidhub_core::types::pagination::PageResponse;
use vidhub_entity::comment::{Comment, CommentView};

use crate::dto::request::ContentRequest;
use crate::dto::{ApiResponse, Empty, validate_request};
use crate::error::ApiError;
use crate::extractors::{AppJson, AppPath, AppQuery, AuthUser, PaginationParams, parse_id};
use crate::state::AppState;

/// GET /api/v1/comments/{video_id}
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(video_id): AppPath<String>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<ApiResponse<PageResponse<CommentView>>, ApiError> {
    let video_id = parse_id(&video_id, "video")?;
    let page = state
        .comment_service
        .list(&auth, video_id, params.into_page_request())
        .await?;
    Ok(ApiResponse::ok(page, "Comments fetched successfully"))
}

/// POST /api/v1/comments/{video_id}
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(video_id): AppPath<String>,
    AppJson(req): AppJson<ContentRequest>,
) -> Result<ApiResponse<Comment>, ApiError> {
    let video_id = parse_id(&video_id, "video")?;
    validate_request(&req)?;
    let comment = state
        .comment_service
        .add(&auth, video_id, req.content.as_deref())
        .await?;
    Ok(ApiResponse::created(comment, "Comment added successfully"))
}

/// PATCH /api/v1/comments/c/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(comment_id): AppPath<String>,
    AppJson(req): AppJson<ContentRequest>,
) -> Result<ApiResponse<Comment>, ApiError> {
    let comment_id = parse_id(&comment_id, "comment")?;
    validate_request(&req)?;
    let comment = state
        .comment_service
        .update(&auth, comment_id, req.content.as_deref())
        .await?;
    Ok(ApiResponse::ok(comment, "Comment updated successfully"))
}

/// DELETE /api/v1/comments/c/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(comment_id): AppPath<String>,
) -> Result<ApiResponse<Empty>, ApiError> {
    let comment_id = parse_id(&comment_id, "comment")?;
    state.comment_service.delete(&auth, comment_id).await?;
    Ok(ApiResponse::ok(Empty {}, "Comment deleted successfully"))
}
