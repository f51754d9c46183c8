//! Channel tweets.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use vidhub_core::error::AppError;
use vidhub_database::repositories::tweet::TweetRepository;
use vidhub_database::repositories::user::UserRepository;
use vidhub_entity::tweet::{Tweet, TweetView};

use crate::context::RequestContext;
use crate::validation::required_text;

const CONTENT_REQUIRED: &str = "Content is required";

/// Handles tweets.
#[derive(Debug, Clone)]
pub struct TweetService {
    tweet_repo: Arc<TweetRepository>,
    user_repo: Arc<UserRepository>,
}

impl TweetService {
    /// Creates a new tweet service.
    pub fn new(tweet_repo: Arc<TweetRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            tweet_repo,
            user_repo,
        }
    }

    /// Post a tweet.
    pub async fn create(&self, ctx: &RequestContext, content: Option<&str>) -> Result<Tweet, AppError> {
        let content = required_text(content, CONTENT_REQUIRED)?;
        let tweet = self.tweet_repo.create(ctx.user_id, &content).await?;
        info!(user_id = %ctx.user_id, tweet_id = %tweet.id, "Tweet created");
        Ok(tweet)
    }

    /// A user's tweets, newest first.
    pub async fn user_tweets(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<Vec<TweetView>, AppError> {
        if !self.user_repo.exists(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        self.tweet_repo.list_by_owner(user_id, ctx.user_id).await
    }

    /// Edit an owned tweet.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        tweet_id: Uuid,
        content: Option<&str>,
    ) -> Result<Tweet, AppError> {
        let content = required_text(content, CONTENT_REQUIRED)?;
        let tweet = self.find(tweet_id).await?;
        ctx.ensure_owner(tweet.owner_id, "You are not allowed to edit this tweet")?;

        self.tweet_repo.update_content(tweet_id, &content).await
    }

    /// Delete an owned tweet.
    pub async fn delete(&self, ctx: &RequestContext, tweet_id: Uuid) -> Result<(), AppError> {
        let tweet = self.find(tweet_id).await?;
        ctx.ensure_owner(tweet.owner_id, "You are not allowed to delete this tweet")?;

        if !self.tweet_repo.delete(tweet_id).await? {
            return Err(AppError::not_found("Tweet not found"));
        }
        info!(user_id = %ctx.user_id, tweet_id = %tweet_id, "Tweet deleted");
        Ok(())
    }

    async fn find(&self, tweet_id: Uuid) -> Result<Tweet, AppError> {
        self.tweet_repo
            .find_by_id(tweet_id)
            .await?
            .ok_or_else(|| AppError::not_found("Tweet not found"))
    }
}
