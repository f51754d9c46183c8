//! Video publishing, listing, viewing and ownership-guarded mutations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use vidhub_core::error::AppError;
use vidhub_core::types::pagination::{PageRequest, PageResponse};
use vidhub_core::types::sorting::{SortDirection, SortField};
use vidhub_database::repositories::video::{
    DEFAULT_VIDEO_SORT, VIDEO_SORT_FIELDS, VideoListFilter, VideoRepository,
};
use vidhub_database::repositories::user::UserRepository;
use vidhub_entity::video::{CreateVideo, UpdateVideo, Video, VideoDetail, VideoWithOwner};
use vidhub_storage::{MediaKind, MediaManager};

use crate::context::RequestContext;
use crate::upload::UploadedFile;
use crate::validation::{optional_text, required_text};

/// Query parameters of the video listing.
#[derive(Debug, Clone, Default)]
pub struct VideoListQuery {
    pub page: PageRequest,
    pub query: Option<String>,
    pub sort_by: Option<String>,
    pub sort_type: Option<String>,
    pub user_id: Option<Uuid>,
}

/// Multipart form for publishing a video.
#[derive(Debug, Clone, Default)]
pub struct PublishVideoInput {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Duration in seconds, as reported by the client.
    pub duration: Option<f64>,
    pub video_file: Option<UploadedFile>,
    pub thumbnail: Option<UploadedFile>,
}

/// Fields of a video update. At least one must be present.
#[derive(Debug, Clone, Default)]
pub struct UpdateVideoInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<UploadedFile>,
}

/// Handles videos.
#[derive(Debug, Clone)]
pub struct VideoService {
    video_repo: Arc<VideoRepository>,
    user_repo: Arc<UserRepository>,
    media: Arc<MediaManager>,
}

impl VideoService {
    /// Creates a new video service.
    pub fn new(
        video_repo: Arc<VideoRepository>,
        user_repo: Arc<UserRepository>,
        media: Arc<MediaManager>,
    ) -> Self {
        Self {
            video_repo,
            user_repo,
            media,
        }
    }

    /// Page through videos. Unpublished videos are only listed when the
    /// caller lists their own channel.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: VideoListQuery,
    ) -> Result<PageResponse<VideoWithOwner>, AppError> {
        let sort = SortField::resolve(
            query.sort_by.as_deref(),
            SortDirection::parse(query.sort_type.as_deref()),
            VIDEO_SORT_FIELDS,
            DEFAULT_VIDEO_SORT,
        );
        let filter = VideoListFilter {
            search: optional_text(query.query.as_deref()),
            owner_id: query.user_id,
            include_unpublished: query.user_id.is_some_and(|id| ctx.is_user(id)),
            sort,
        };
        self.video_repo.list(&filter, query.page).await
    }

    /// Upload a video file and thumbnail and create the video.
    pub async fn publish(
        &self,
        ctx: &RequestContext,
        input: PublishVideoInput,
    ) -> Result<Video, AppError> {
        const REQUIRED: &str = "Title and description are required";
        let title = required_text(input.title.as_deref(), REQUIRED)?;
        let description = required_text(input.description.as_deref(), REQUIRED)?;
        let duration = validate_duration(input.duration)?;
        let video_file = input
            .video_file
            .ok_or_else(|| AppError::validation("Video file is required"))?;
        let thumbnail = input
            .thumbnail
            .ok_or_else(|| AppError::validation("Thumbnail is required"))?;

        let video_file = video_file.store(&self.media, MediaKind::Video).await?;
        let thumbnail = match thumbnail.store(&self.media, MediaKind::Thumbnail).await {
            Ok(stored) => stored,
            Err(e) => {
                self.media.delete_quietly(&video_file.url).await;
                return Err(e);
            }
        };

        let created = self
            .video_repo
            .create(&CreateVideo {
                owner_id: ctx.user_id,
                video_file: video_file.url.clone(),
                thumbnail: thumbnail.url.clone(),
                title,
                description,
                duration,
            })
            .await;

        match created {
            Ok(video) => {
                info!(user_id = %ctx.user_id, video_id = %video.id, "Video published");
                Ok(video)
            }
            Err(e) => {
                self.media.delete_quietly(&video_file.url).await;
                self.media.delete_quietly(&thumbnail.url).await;
                Err(e)
            }
        }
    }

    /// View a video. Counts the view and records it in the caller's watch
    /// history.
    pub async fn view(&self, ctx: &RequestContext, video_id: Uuid) -> Result<VideoDetail, AppError> {
        let mut detail = self
            .video_repo
            .find_detail(video_id, ctx.user_id)
            .await?
            .filter(|d| d.video.is_visible_to(ctx.user_id))
            .ok_or_else(|| AppError::not_found("Video not found"))?;

        self.video_repo.increment_views(video_id).await?;
        self.user_repo.record_watch(ctx.user_id, video_id).await?;
        detail.video.views += 1;

        Ok(detail)
    }

    /// Update title, description and/or thumbnail of an owned video.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        video_id: Uuid,
        input: UpdateVideoInput,
    ) -> Result<Video, AppError> {
        let video = self.find_owned(ctx, video_id, "edit").await?;

        let mut update = UpdateVideo {
            title: optional_text(input.title.as_deref()),
            description: optional_text(input.description.as_deref()),
            thumbnail: None,
        };
        if update.is_empty() && input.thumbnail.is_none() {
            return Err(AppError::validation(
                "Provide a title, description or thumbnail to update",
            ));
        }

        if let Some(file) = input.thumbnail {
            update.thumbnail = Some(file.store(&self.media, MediaKind::Thumbnail).await?.url);
        }

        let updated = match self.video_repo.update(video_id, &update).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(url) = &update.thumbnail {
                    self.media.delete_quietly(url).await;
                }
                return Err(e);
            }
        };

        if update.thumbnail.is_some() {
            self.media.delete_quietly(&video.thumbnail).await;
        }
        info!(user_id = %ctx.user_id, video_id = %video_id, "Video updated");
        Ok(updated)
    }

    /// Delete an owned video and its media files.
    pub async fn delete(&self, ctx: &RequestContext, video_id: Uuid) -> Result<(), AppError> {
        let video = self.find_owned(ctx, video_id, "delete").await?;

        if !self.video_repo.delete(video_id).await? {
            return Err(AppError::not_found("Video not found"));
        }
        self.media.delete_quietly(&video.video_file).await;
        self.media.delete_quietly(&video.thumbnail).await;

        info!(user_id = %ctx.user_id, video_id = %video_id, "Video deleted");
        Ok(())
    }

    /// Flip the published flag of an owned video.
    pub async fn toggle_publish(
        &self,
        ctx: &RequestContext,
        video_id: Uuid,
    ) -> Result<Video, AppError> {
        self.find_owned(ctx, video_id, "modify").await?;
        let video = self.video_repo.toggle_publish(video_id).await?;
        info!(
            user_id = %ctx.user_id,
            video_id = %video_id,
            is_published = video.is_published,
            "Video publish status toggled"
        );
        Ok(video)
    }

    async fn find_owned(
        &self,
        ctx: &RequestContext,
        video_id: Uuid,
        action: &str,
    ) -> Result<Video, AppError> {
        let video = self
            .video_repo
            .find_by_id(video_id)
            .await?
            .filter(|v| v.is_visible_to(ctx.user_id))
            .ok_or_else(|| AppError::not_found("Video not found"))?;
        ctx.ensure_owner(
            video.owner_id,
            &format!("You are not allowed to {action} this video"),
        )?;
        Ok(video)
    }
}

fn validate_duration(duration: Option<f64>) -> Result<f64, AppError> {
    match duration {
        None => Ok(0.0),
        Some(d) if d.is_finite() && d >= 0.0 => Ok(d),
        Some(_) => Err(AppError::validation(
            "Duration must be a non-negative number of seconds",
        )),
    }
}
