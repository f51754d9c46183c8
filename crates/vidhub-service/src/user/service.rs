//! User self-service operations: registration, account updates, media,
//! channel profiles and watch history.

use std::sync::Arc;

use tracing::info;

use vidhub_auth::password::{PasswordHasher, PasswordValidator};
use vidhub_auth::session::SessionManager;
use vidhub_core::error::AppError;
use vidhub_database::repositories::user::UserRepository;
use vidhub_entity::user::{ChannelProfile, CreateUser, User};
use vidhub_entity::video::WatchHistoryEntry;
use vidhub_storage::{MediaKind, MediaManager};

use crate::context::RequestContext;
use crate::upload::UploadedFile;
use crate::validation::{normalize_identity, required_text};

const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// Registration form.
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<UploadedFile>,
    pub cover_image: Option<UploadedFile>,
}

/// Handles user accounts and channel views.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    sessions: Arc<SessionManager>,
    media: Arc<MediaManager>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        sessions: Arc<SessionManager>,
        media: Arc<MediaManager>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            sessions,
            media,
        }
    }

    /// Register a new user.
    pub async fn register(&self, input: RegisterInput) -> Result<User, AppError> {
        let full_name = required_text(input.full_name.as_deref(), ALL_FIELDS_REQUIRED)?;
        let email = normalize_identity(&required_text(
            input.email.as_deref(),
            ALL_FIELDS_REQUIRED,
        )?);
        let user_name = normalize_identity(&required_text(
            input.user_name.as_deref(),
            ALL_FIELDS_REQUIRED,
        )?);
        let password = input
            .password
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| AppError::validation(ALL_FIELDS_REQUIRED))?;

        if self
            .user_repo
            .find_by_email_or_user_name(&email, &user_name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "User with email or username already exists",
            ));
        }

        let avatar = input
            .avatar
            .ok_or_else(|| AppError::validation("Avatar file is required"))?;
        self.validator.validate(&password)?;
        let password_hash = self.hasher.hash_password(&password)?;

        let avatar = avatar.store(&self.media, MediaKind::Avatar).await?;
        let cover_image = match input.cover_image {
            Some(file) => match file.store(&self.media, MediaKind::CoverImage).await {
                Ok(stored) => Some(stored),
                Err(e) => {
                    self.media.delete_quietly(&avatar.url).await;
                    return Err(e);
                }
            },
            None => None,
        };

        let created = self
            .user_repo
            .create(&CreateUser {
                full_name,
                email,
                user_name,
                avatar: avatar.url.clone(),
                cover_image: cover_image.as_ref().map(|c| c.url.clone()),
                password_hash,
            })
            .await;

        match created {
            Ok(user) => {
                info!(user_id = %user.id, user_name = %user.user_name, "User registered");
                Ok(user)
            }
            Err(e) => {
                self.media.delete_quietly(&avatar.url).await;
                if let Some(cover) = cover_image {
                    self.media.delete_quietly(&cover.url).await;
                }
                Err(e)
            }
        }
    }

    /// The authenticated user.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Update full name and email. Both are required.
    pub async fn update_account(
        &self,
        ctx: &RequestContext,
        full_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, AppError> {
        let full_name = required_text(full_name, ALL_FIELDS_REQUIRED)?;
        let email = normalize_identity(&required_text(email, ALL_FIELDS_REQUIRED)?);

        let user = self
            .user_repo
            .update_account(ctx.user_id, &full_name, &email)
            .await?;
        info!(user_id = %ctx.user_id, "Account details updated");
        Ok(user)
    }

    /// Change the password and revoke every other session of the user.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.current_user(ctx).await?;

        if !self
            .hasher
            .verify_password(old_password, &user.password_hash)?
        {
            return Err(AppError::validation("Invalid old password"));
        }

        self.validator.validate(new_password)?;
        self.validator
            .validate_not_same(old_password, new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(ctx.user_id, &new_hash).await?;
        self.sessions
            .revoke_other_sessions(ctx.user_id, ctx.session_id)
            .await?;

        info!(user_id = %ctx.user_id, "Password changed");
        Ok(())
    }

    /// Replace the avatar. The previous file is deleted.
    pub async fn update_avatar(
        &self,
        ctx: &RequestContext,
        file: Option<UploadedFile>,
    ) -> Result<User, AppError> {
        let file = file.ok_or_else(|| AppError::validation("Avatar file is missing"))?;
        let previous = self.current_user(ctx).await?;

        let stored = file.store(&self.media, MediaKind::Avatar).await?;
        let user = match self.user_repo.update_avatar(ctx.user_id, &stored.url).await {
            Ok(user) => user,
            Err(e) => {
                self.media.delete_quietly(&stored.url).await;
                return Err(e);
            }
        };

        self.media.delete_quietly(&previous.avatar).await;
        info!(user_id = %ctx.user_id, "Avatar updated");
        Ok(user)
    }

    /// Replace the cover image. The previous file is deleted.
    pub async fn update_cover_image(
        &self,
        ctx: &RequestContext,
        file: Option<UploadedFile>,
    ) -> Result<User, AppError> {
        let file = file.ok_or_else(|| AppError::validation("Cover image file is missing"))?;
        let previous = self.current_user(ctx).await?;

        let stored = file.store(&self.media, MediaKind::CoverImage).await?;
        let user = match self
            .user_repo
            .update_cover_image(ctx.user_id, &stored.url)
            .await
        {
            Ok(user) => user,
            Err(e) => {
                self.media.delete_quietly(&stored.url).await;
                return Err(e);
            }
        };

        if let Some(old) = previous.cover_image {
            self.media.delete_quietly(&old).await;
        }
        info!(user_id = %ctx.user_id, "Cover image updated");
        Ok(user)
    }

    /// A channel's public profile as seen by the caller.
    pub async fn channel_profile(
        &self,
        ctx: &RequestContext,
        user_name: &str,
    ) -> Result<ChannelProfile, AppError> {
        let user_name = required_text(Some(user_name), "Username is missing")?;
        self.user_repo
            .channel_profile(&user_name, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Channel does not exist"))
    }

    /// The caller's watch history, most recent first.
    pub async fn watch_history(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<WatchHistoryEntry>, AppError> {
        self.user_repo.watch_history(ctx.user_id).await
    }
}
