//! Like toggles and the liked-videos listing.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use vidhub_core::error::AppError;
use vidhub_database::repositories::comment::CommentRepository;
use vidhub_database::repositories::like::LikeRepository;
use vidhub_database::repositories::tweet::TweetRepository;
use vidhub_database::repositories::video::VideoRepository;
use vidhub_entity::like::LikeTarget;
use vidhub_entity::video::LikedVideo;

use crate::context::RequestContext;

/// Videos liked by the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedVideos {
    pub liked_videos: Vec<LikedVideo>,
    pub videos_count: usize,
}

/// Handles likes.
#[derive(Debug, Clone)]
pub struct LikeService {
    like_repo: Arc<LikeRepository>,
    video_repo: Arc<VideoRepository>,
    comment_repo: Arc<CommentRepository>,
    tweet_repo: Arc<TweetRepository>,
}

impl LikeService {
    /// Creates a new like service.
    pub fn new(
        like_repo: Arc<LikeRepository>,
        video_repo: Arc<VideoRepository>,
        comment_repo: Arc<CommentRepository>,
        tweet_repo: Arc<TweetRepository>,
    ) -> Self {
        Self {
            like_repo,
            video_repo,
            comment_repo,
            tweet_repo,
        }
    }

    /// Toggle the caller's like on a target. Returns whether the target is
    /// liked afterwards.
    pub async fn toggle(&self, ctx: &RequestContext, target: LikeTarget) -> Result<bool, AppError> {
        let exists = match target {
            LikeTarget::Video(id) => self
                .video_repo
                .find_by_id(id)
                .await?
                .is_some_and(|v| v.is_visible_to(ctx.user_id)),
            LikeTarget::Comment(id) => self.comment_repo.find_by_id(id).await?.is_some(),
            LikeTarget::Tweet(id) => self.tweet_repo.find_by_id(id).await?.is_some(),
        };
        if !exists {
            return Err(AppError::not_found(format!("{} not found", target.label())));
        }

        let liked = self.like_repo.toggle(ctx.user_id, target).await?;
        info!(
            user_id = %ctx.user_id,
            target = target.label(),
            target_id = %target.id(),
            liked,
            "Like toggled"
        );
        Ok(liked)
    }

    /// Videos the caller liked, newest like first.
    pub async fn liked_videos(&self, ctx: &RequestContext) -> Result<LikedVideos, AppError> {
        let liked_videos = self.like_repo.liked_videos(ctx.user_id).await?;
        Ok(LikedVideos {
            videos_count: liked_videos.len(),
            liked_videos,
        })
    }
}
