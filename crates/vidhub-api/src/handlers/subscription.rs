//! Subscription handlers.

use axum::extract::State;

use vidhub_entity::subscription::{SubscribedChannel, Subscriber};

use crate::dto::ApiResponse;
use crate::dto::response::SubscriptionStatus;
use crate::error::ApiError;
use crate::extractors::{AppPath, AuthUser, parse_id};
use crate::state::AppState;

/// POST /api/v1/subscriptions/c/{channel_id}
pub async fn toggle_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(channel_id): AppPath<String>,
) -> Result<ApiResponse<SubscriptionStatus>, ApiError> {
    let channel_id = parse_id(&channel_id, "channel")?;
    let subscribed = state
        .subscription_service
        .toggle(&auth, channel_id)
        .await?;
    let message = if subscribed {
        "Subscribed successfully"
    } else {
        "Unsubscribed successfully"
    };
    Ok(ApiResponse::ok(SubscriptionStatus { subscribed }, message))
}

/// GET /api/v1/subscriptions/c/{channel_id}
pub async fn channel_subscribers(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppPath(channel_id): AppPath<String>,
) -> Result<ApiResponse<Vec<Subscriber>>, ApiError> {
    let channel_id = parse_id(&channel_id, "channel")?;
    let subscribers = state.subscription_service.subscribers(channel_id).await?;
    Ok(ApiResponse::ok(subscribers, "Subscribers fetched successfully"))
}

/// GET /api/v1/subscriptions/u/{subscriber_id}
pub async fn subscribed_channels(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppPath(subscriber_id): AppPath<String>,
) -> Result<ApiResponse<Vec<SubscribedChannel>>, ApiError> {
    let subscriber_id = parse_id(&subscriber_id, "subscriber")?;
    let channels = state
        .subscription_service
        .subscribed_channels(subscriber_id)
        .await?;
    Ok(ApiResponse::ok(channels, "Subscribed channels fetched successfully"))
}
