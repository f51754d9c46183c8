//! Session cookies carrying the access and refresh tokens.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use vidhub_core::config::{AuthConfig, SameSitePolicy};
use vidhub_entity::session::TokenPair;

/// Cookie holding the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
/// Cookie holding the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

fn same_site(policy: SameSitePolicy) -> SameSite {
    match policy {
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::Lax => SameSite::Lax,
        SameSitePolicy::None => SameSite::None,
    }
}

fn session_cookie(name: &'static str, value: String, config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(same_site(config.cookie_same_site))
        .path("/")
        .build()
}

/// Set both token cookies.
pub fn set_token_cookies(jar: CookieJar, tokens: &TokenPair, config: &AuthConfig) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        tokens.access_token.clone(),
        config,
    ))
    .add(session_cookie(
        REFRESH_TOKEN_COOKIE,
        tokens.refresh_token.clone(),
        config,
    ))
}

/// Expire both token cookies.
pub fn clear_token_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_TOKEN_COOKIE).path("/"))
}
