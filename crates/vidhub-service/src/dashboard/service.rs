//! Channel statistics and the channel's video list.

use std::sync::Arc;

use uuid::Uuid;

use vidhub_core::error::AppError;
use vidhub_database::repositories::dashboard::DashboardRepository;
use vidhub_database::repositories::user::UserRepository;
use vidhub_entity::dashboard::ChannelStats;
use vidhub_entity::video::ChannelVideo;

use crate::context::RequestContext;

/// Handles the channel dashboard.
#[derive(Debug, Clone)]
pub struct DashboardService {
    dashboard_repo: Arc<DashboardRepository>,
    user_repo: Arc<UserRepository>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(dashboard_repo: Arc<DashboardRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            dashboard_repo,
            user_repo,
        }
    }

    /// Totals for a channel.
    pub async fn stats(&self, channel_id: Uuid) -> Result<ChannelStats, AppError> {
        self.ensure_channel(channel_id).await?;
        self.dashboard_repo.channel_stats(channel_id).await
    }

    /// A channel's videos with like and comment counts. The owner also sees
    /// unpublished videos.
    pub async fn videos(
        &self,
        ctx: &RequestContext,
        channel_id: Uuid,
    ) -> Result<Vec<ChannelVideo>, AppError> {
        self.ensure_channel(channel_id).await?;
        self.dashboard_repo
            .channel_videos(channel_id, ctx.is_user(channel_id))
            .await
    }

    async fn ensure_channel(&self, channel_id: Uuid) -> Result<(), AppError> {
        if self.user_repo.exists(channel_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Channel not found"))
        }
    }
}
