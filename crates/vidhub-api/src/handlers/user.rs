//! User handlers: registration, the session lifecycle, account management,
//! channel profiles and watch history.

use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum_extra::extract::cookie::CookieJar;
use bytes::Bytes;
use validator::ValidateEmail;

use vidhub_core::error::AppError;
use vidhub_entity::user::{ChannelProfile, User};
use vidhub_entity::video::WatchHistoryEntry;
use vidhub_service::RegisterInput;

use crate::cookies::{REFRESH_TOKEN_COOKIE, clear_token_cookies, set_token_cookies};
use crate::dto::request::{
    ChangePasswordRequest, LoginRequest, RefreshRequest, UpdateAccountRequest,
};
use crate::dto::response::{LoginResponse, TokenResponse};
use crate::dto::{ApiResponse, Empty, validate_request};
use crate::error::ApiError;
use crate::extractors::{AppJson, AppPath, AuthUser, ClientMeta, MultipartForm};
use crate::state::AppState;

/// POST /api/v1/users/register
pub async fn register(
    State(state): State<AppState>,
    mut form: MultipartForm,
) -> Result<ApiResponse<User>, ApiError> {

    if let Some(email) = form.text("email").filter(|e| !e.trim().is_empty()) {
        if !email.trim().validate_email() {
            return Err(AppError::validation("Invalid email address").into());
        }
    }

    let user = state
        .user_service
        .register(RegisterInput {
            full_name: form.text("fullName"),
            email: form.text("email"),
            user_name: form.text("userName"),
            password: form.text("password"),
            avatar: form.take_file("avatar"),
            cover_image: form.take_file("coverImage"),
        })
        .await?;

    Ok(ApiResponse::created(user, "User registered successfully"))
}

/// POST /api/v1/users/login
pub async fn login(
    State(state): State<AppState>,
    ClientMeta(client): ClientMeta,
    jar: CookieJar,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<LoginResponse>), ApiError> {
    let identifier = req
        .identifier()
        .ok_or_else(|| AppError::validation("Username or email is required"))?
        .to_string();
    validate_request(&req)?;

    let result = state
        .session_manager
        .login(&identifier, &req.password, client)
        .await?;

    let jar = set_token_cookies(jar, &result.tokens, &state.config.auth);
    Ok((
        jar,
        ApiResponse::ok(
            LoginResponse {
                user: result.user,
                access_token: result.tokens.access_token,
                refresh_token: result.tokens.refresh_token,
            },
            "Logged in successfully",
        ),
    ))
}

/// POST /api/v1/users/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, ApiResponse<Empty>), ApiError> {
    state.session_manager.logout(auth.session_id).await?;
    Ok((
        clear_token_cookies(jar),
        ApiResponse::ok(Empty {}, "Logged out successfully"),
    ))
}

/// POST /api/v1/users/refresh-token
///
/// The refresh token comes from the `refreshToken` cookie or the JSON body.
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Bytes, BytesRejection>,
) -> Result<(CookieJar, ApiResponse<TokenResponse>), ApiError> {
    let body = body?;
    let from_cookie = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());
    let token = from_cookie
        .or_else(|| {
            serde_json::from_slice::<RefreshRequest>(&body)
                .ok()
                .and_then(|req| req.refresh_token)
                .filter(|v| !v.trim().is_empty())
        })
        .ok_or_else(|| AppError::authentication("Unauthorized request"))?;

    let result = state.session_manager.refresh(token.trim()).await?;

    let jar = set_token_cookies(jar, &result.tokens, &state.config.auth);
    Ok((
        jar,
        ApiResponse::ok(
            TokenResponse {
                access_token: result.tokens.access_token,
                refresh_token: result.tokens.refresh_token,
            },
            "Access token refreshed successfully",
        ),
    ))
}

/// POST /api/v1/users/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<ChangePasswordRequest>,
) -> Result<ApiResponse<Empty>, ApiError> {
    validate_request(&req)?;
    state
        .user_service
        .change_password(&auth, &req.old_password, &req.new_password)
        .await?;
    Ok(ApiResponse::ok(Empty {}, "Password changed successfully"))
}

/// GET /api/v1/users/current-user
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<ApiResponse<User>, ApiError> {
    let user = state.user_service.current_user(&auth).await?;
    Ok(ApiResponse::ok(user, "Current user fetched successfully"))
}

/// PATCH /api/v1/users/update-account
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<UpdateAccountRequest>,
) -> Result<ApiResponse<User>, ApiError> {
    validate_request(&req)?;
    let user = state
        .user_service
        .update_account(&auth, req.full_name.as_deref(), req.email.as_deref())
        .await?;
    Ok(ApiResponse::ok(user, "Account details updated successfully"))
}

/// PATCH /api/v1/users/avatar
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> Result<ApiResponse<User>, ApiError> {
    let user = state
        .user_service
        .update_avatar(&auth, form.take_file("avatar"))
        .await?;
    Ok(ApiResponse::ok(user, "Avatar updated successfully"))
}

/// PATCH /api/v1/users/cover-image
pub async fn update_cover_image(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> Result<ApiResponse<User>, ApiError> {
    let user = state
        .user_service
        .update_cover_image(&auth, form.take_file("coverImage"))
        .await?;
    Ok(ApiResponse::ok(user, "Cover image updated successfully"))
}

/// GET /api/v1/users/c/{user_name}
pub async fn channel_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(user_name): AppPath<String>,
) -> Result<ApiResponse<ChannelProfile>, ApiError> {
    let profile = state.user_service.channel_profile(&auth, &user_name).await?;
    Ok(ApiResponse::ok(profile, "User channel fetched successfully"))
}

/// GET /api/v1/users/history
pub async fn watch_history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<ApiResponse<Vec<WatchHistoryEntry>>, ApiError> {
    let history = state.user_service.watch_history(&auth).await?;
    Ok(ApiResponse::ok(history, "Watch history fetched successfully"))
}
