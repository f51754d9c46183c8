//! `AuthUser` extractor: pulls the access token from the `accessToken`
//! cookie or the `Authorization` header, validates it against its session,
//! and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use vidhub_core::error::AppError;
use vidhub_service::context::RequestContext;

use crate::cookies::ACCESS_TOKEN_COOKIE;
use crate::error::ApiError;
use crate::extractors::client::ClientMeta;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = access_token(&parts.headers)
            .ok_or_else(|| AppError::authentication("Unauthorized request"))?;

        let claims = state.session_manager.authenticate(&token).await?;
        let ClientMeta(client) = ClientMeta::from_parts(parts);

        let ctx = RequestContext::new(
            claims.user_id(),
            claims.session_id(),
            claims.username.clone().unwrap_or_default(),
            client.ip_address,
            client.user_agent,
        );

        Ok(AuthUser(ctx))
    }
}

/// The access token from the cookie, falling back to a Bearer header.
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = CookieJar::from_headers(headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());
    from_cookie.or_else(|| {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
    })
}
