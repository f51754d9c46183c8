//! Channel subscriptions.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use vidhub_core::error::AppError;
use vidhub_database::repositories::subscription::SubscriptionRepository;
use vidhub_database::repositories::user::UserRepository;
use vidhub_entity::subscription::{SubscribedChannel, Subscriber};

use crate::context::RequestContext;

/// Handles subscriptions.
#[derive(Debug, Clone)]
pub struct SubscriptionService {
    subscription_repo: Arc<SubscriptionRepository>,
    user_repo: Arc<UserRepository>,
}

impl SubscriptionService {
    /// Creates a new subscription service.
    pub fn new(
        subscription_repo: Arc<SubscriptionRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            subscription_repo,
            user_repo,
        }
    }

    /// Subscribe to or unsubscribe from a channel. Returns whether the caller
    /// is subscribed afterwards.
    pub async fn toggle(&self, ctx: &RequestContext, channel_id: Uuid) -> Result<bool, AppError> {
        self.ensure_user(channel_id, "Channel not found").await?;
        if ctx.is_user(channel_id) {
            return Err(AppError::validation("You cannot subscribe to your own channel"));
        }

        let subscribed = self
            .subscription_repo
            .toggle(ctx.user_id, channel_id)
            .await?;
        info!(user_id = %ctx.user_id, channel_id = %channel_id, subscribed, "Subscription toggled");
        Ok(subscribed)
    }

    /// Users subscribed to a channel.
    pub async fn subscribers(&self, channel_id: Uuid) -> Result<Vec<Subscriber>, AppError> {
        self.ensure_user(channel_id, "Channel not found").await?;
        self.subscription_repo.subscribers(channel_id).await
    }

    /// Channels a user subscribes to, each with its latest published video.
    pub async fn subscribed_channels(
        &self,
        subscriber_id: Uuid,
    ) -> Result<Vec<SubscribedChannel>, AppError> {
        self.ensure_user(subscriber_id, "Subscriber not found").await?;
        self.subscription_repo
            .subscribed_channels(subscriber_id)
            .await
    }

    async fn ensure_user(&self, user_id: Uuid, message: &str) -> Result<(), AppError> {
        if self.user_repo.exists(user_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(message))
        }
    }
}
