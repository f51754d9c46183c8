//! Tweet handlers.

use axum::extract::State;

use vidhub_entity::tweet::{Tweet, TweetView};

use crate::dto::request::ContentRequest;
use crate::dto::{ApiResponse, Empty, validate_request};
use crate::error::ApiError;
use crate::extractors::{AppJson, AppPath, AuthUser, parse_id};
use crate::state::AppState;

/// POST /api/v1/tweets
pub async fn create_tweet(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<ContentRequest>,
) -> Result<ApiResponse<Tweet>, ApiError> {
    validate_request(&req)?;
    let tweet = state
        .tweet_service
        .create(&auth, req.content.as_deref())
        .await?;
    Ok(ApiResponse::created(tweet, "Tweet created successfully"))
}

/// GET /api/v1/tweets/user/{user_id}
pub async fn user_tweets(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(user_id): AppPath<String>,
) -> Result<ApiResponse<Vec<TweetView>>, ApiError> {
    let user_id = parse_id(&user_id, "user")?;
    let tweets = state.tweet_service.user_tweets(&auth, user_id).await?;
    Ok(ApiResponse::ok(tweets, "Tweets fetched successfully"))
}

/// PATCH /api/v1/tweets/{tweet_id}
pub async fn update_tweet(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(tweet_id): AppPath<String>,
    AppJson(req): AppJson<ContentRequest>,
) -> Result<ApiResponse<Tweet>, ApiError> {
    let tweet_id = parse_id(&tweet_id, "tweet")?;
    validate_request(&req)?;
    let tweet = state
        .tweet_service
        .update(&auth, tweet_id, req.content.as_deref())
        .await?;
    Ok(ApiResponse::ok(tweet, "Tweet updated successfully"))
}

/// DELETE /api/v1/tweets/{tweet_id}
pub async fn delete_tweet(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(tweet_id): AppPath<String>,
) -> Result<ApiResponse<Empty>, ApiError> {
    let tweet_id = parse_id(&tweet_id, "tweet")?;
    state.tweet_service.delete(&auth, tweet_id).await?;
    Ok(ApiResponse::ok(Empty {}, "Tweet deleted successfully"))
}
