//! Playlists and their video entries.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use vidhub_core::error::AppError;
use vidhub_database::repositories::playlist::PlaylistRepository;
use vidhub_database::repositories::user::UserRepository;
use vidhub_database::repositories::video::VideoRepository;
use vidhub_entity::playlist::{Playlist, PlaylistDetail, PlaylistSummary};

use crate::context::RequestContext;
use crate::validation::required_text;

const NAME_REQUIRED: &str = "Name and description are required";

/// Handles playlists.
#[derive(Debug, Clone)]
pub struct PlaylistService {
    playlist_repo: Arc<PlaylistRepository>,
    video_repo: Arc<VideoRepository>,
    user_repo: Arc<UserRepository>,
}

impl PlaylistService {
    /// Creates a new playlist service.
    pub fn new(
        playlist_repo: Arc<PlaylistRepository>,
        video_repo: Arc<VideoRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            playlist_repo,
            video_repo,
            user_repo,
        }
    }

    /// Create a playlist owned by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Playlist, AppError> {
        let name = required_text(name, NAME_REQUIRED)?;
        let description = required_text(description, NAME_REQUIRED)?;

        let playlist = self
            .playlist_repo
            .create(ctx.user_id, &name, &description)
            .await?;
        info!(user_id = %ctx.user_id, playlist_id = %playlist.id, "Playlist created");
        Ok(playlist)
    }

    /// A user's playlists. Only the owner may list them.
    pub async fn user_playlists(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<Vec<PlaylistSummary>, AppError> {
        if !self.user_repo.exists(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        ctx.ensure_owner(user_id, "You are not allowed to view these playlists")?;
        self.playlist_repo.list_by_owner(user_id).await
    }

    /// A playlist with its owner and the videos the caller can see.
    pub async fn get(&self, ctx: &RequestContext, playlist_id: Uuid) -> Result<PlaylistDetail, AppError> {
        let summary = self
            .playlist_repo
            .find_summary(playlist_id)
            .await?
            .ok_or_else(|| AppError::not_found("Playlist not found"))?;
        let owner = self
            .user_repo
            .find_summary(summary.playlist.owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Playlist owner not found"))?;
        let videos = self.playlist_repo.videos(playlist_id, ctx.user_id).await?;

        Ok(PlaylistDetail {
            summary,
            owner,
            videos,
        })
    }

    /// Append a video to an owned playlist.
    pub async fn add_video(
        &self,
        ctx: &RequestContext,
        playlist_id: Uuid,
        video_id: Uuid,
    ) -> Result<PlaylistSummary, AppError> {
        self.find_owned_with_video(ctx, playlist_id, video_id, "modify")
            .await?;

        if !self.playlist_repo.add_video(playlist_id, video_id).await? {
            return Err(AppError::validation("Video already exists in playlist"));
        }
        info!(user_id = %ctx.user_id, playlist_id = %playlist_id, video_id = %video_id, "Video added to playlist");
        self.summary(playlist_id).await
    }

    /// Remove a video from an owned playlist.
    pub async fn remove_video(
        &self,
        ctx: &RequestContext,
        playlist_id: Uuid,
        video_id: Uuid,
    ) -> Result<PlaylistSummary, AppError> {
        self.find_owned_with_video(ctx, playlist_id, video_id, "modify")
            .await?;

        if !self.playlist_repo.remove_video(playlist_id, video_id).await? {
            return Err(AppError::validation("Video does not exist in playlist"));
        }
        info!(user_id = %ctx.user_id, playlist_id = %playlist_id, video_id = %video_id, "Video removed from playlist");
        self.summary(playlist_id).await
    }

    /// Rename an owned playlist.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        playlist_id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Playlist, AppError> {
        let name = required_text(name, NAME_REQUIRED)?;
        let description = required_text(description, NAME_REQUIRED)?;
        self.find_owned(ctx, playlist_id, "update").await?;

        self.playlist_repo
            .update(playlist_id, &name, &description)
            .await
    }

    /// Delete an owned playlist. The videos themselves are untouched.
    pub async fn delete(&self, ctx: &RequestContext, playlist_id: Uuid) -> Result<(), AppError> {
        self.find_owned(ctx, playlist_id, "delete").await?;

        if !self.playlist_repo.delete(playlist_id).await? {
            return Err(AppError::not_found("Playlist not found"));
        }
        info!(user_id = %ctx.user_id, playlist_id = %playlist_id, "Playlist deleted");
        Ok(())
    }

    async fn summary(&self, playlist_id: Uuid) -> Result<PlaylistSummary, AppError> {
        self.playlist_repo
            .find_summary(playlist_id)
            .await?
            .ok_or_else(|| AppError::not_found("Playlist not found"))
    }

    async fn find_owned(
        &self,
        ctx: &RequestContext,
        playlist_id: Uuid,
        action: &str,
    ) -> Result<Playlist, AppError> {
        let playlist = self
            .playlist_repo
            .find_by_id(playlist_id)
            .await?
            .ok_or_else(|| AppError::not_found("Playlist not found"))?;
        ctx.ensure_owner(
            playlist.owner_id,
            &format!("You are not allowed to {action} this playlist"),
        )?;
        Ok(playlist)
    }

    /// Playlist and video must both exist before ownership is checked.
    async fn find_owned_with_video(
        &self,
        ctx: &RequestContext,
        playlist_id: Uuid,
        video_id: Uuid,
        action: &str,
    ) -> Result<Playlist, AppError> {
        let playlist = self
            .playlist_repo
            .find_by_id(playlist_id)
            .await?
            .ok_or_else(|| AppError::not_found("Playlist not found"))?;
        self.video_repo
            .find_by_id(video_id)
            .await?
            .filter(|v| v.is_visible_to(ctx.user_id))
            .ok_or_else(|| AppError::not_found("Video not found"))?;
        ctx.ensure_owner(
            playlist.owner_id,
            &format!("You are not allowed to {action} this playlist"),
        )?;
        Ok(playlist)
    }
}
