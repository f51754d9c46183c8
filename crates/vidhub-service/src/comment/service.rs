//! Comments on videos.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use vidhub_core::error::AppError;
use vidhub_core::types::pagination::{PageRequest, PageResponse};
use vidhub_database::repositories::comment::CommentRepository;
use vidhub_database::repositories::video::VideoRepository;
use vidhub_entity::comment::{Comment, CommentView};

use crate::context::RequestContext;
use crate::validation::required_text;

const CONTENT_REQUIRED: &str = "Content is required";

/// Handles comments.
#[derive(Debug, Clone)]
pub struct CommentService {
    comment_repo: Arc<CommentRepository>,
    video_repo: Arc<VideoRepository>,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(comment_repo: Arc<CommentRepository>, video_repo: Arc<VideoRepository>) -> Self {
        Self {
            comment_repo,
            video_repo,
        }
    }

    /// Page through a video's comments, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        video_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResponse<CommentView>, AppError> {
        self.ensure_video_visible(ctx, video_id).await?;
        self.comment_repo
            .list_for_video(video_id, ctx.user_id, page)
            .await
    }

    /// Comment on a video.
    pub async fn add(
        &self,
        ctx: &RequestContext,
        video_id: Uuid,
        content: Option<&str>,
    ) -> Result<Comment, AppError> {
        let content = required_text(content, CONTENT_REQUIRED)?;
        self.ensure_video_visible(ctx, video_id).await?;

        let comment = self
            .comment_repo
            .create(video_id, ctx.user_id, &content)
            .await?;
        info!(user_id = %ctx.user_id, comment_id = %comment.id, "Comment added");
        Ok(comment)
    }

    /// Edit an owned comment.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        comment_id: Uuid,
        content: Option<&str>,
    ) -> Result<Comment, AppError> {
        let content = required_text(content, CONTENT_REQUIRED)?;
        let comment = self.find(comment_id).await?;
        ctx.ensure_owner(comment.owner_id, "You are not allowed to edit this comment")?;

        self.comment_repo.update_content(comment_id, &content).await
    }

    /// Delete an owned comment.
    pub async fn delete(&self, ctx: &RequestContext, comment_id: Uuid) -> Result<(), AppError> {
        let comment = self.find(comment_id).await?;
        ctx.ensure_owner(comment.owner_id, "You are not allowed to delete this comment")?;

        if !self.comment_repo.delete(comment_id).await? {
            return Err(AppError::not_found("Comment not found"));
        }
        info!(user_id = %ctx.user_id, comment_id = %comment_id, "Comment deleted");
        Ok(())
    }

    async fn find(&self, comment_id: Uuid) -> Result<Comment, AppError> {
        self.comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))
    }

    async fn ensure_video_visible(&self, ctx: &RequestContext, video_id: Uuid) -> Result<(), AppError> {
        self.video_repo
            .find_by_id(video_id)
            .await?
            .filter(|v| v.is_visible_to(ctx.user_id))
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Video not found"))
    }
}
