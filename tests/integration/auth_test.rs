//! Registration, login and session lifecycle tests.

use std::time::Duration;

use chrono::{DateTime, Utc};
use http::StatusCode;
use serde_json::json;

use crate::helpers::{PNG_BYTES, Part, TestApp, unique};

#[tokio::test]
async fn test_register_and_login_sets_cookies() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("reg").await;

    let response = app.login(&user.user_name, &user.password).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["user"]["userName"], user.user_name);
    assert!(response.data()["user"].get("passwordHash").is_none());

    let access = response.cookie("accessToken").expect("accessToken cookie");
    assert_eq!(access, response.data()["accessToken"].as_str().unwrap());
    let header = response
        .set_cookie_header("refreshToken")
        .expect("refreshToken cookie");
    assert!(header.contains("HttpOnly"));
    assert!(header.contains("Path=/"));
}

#[tokio::test]
async fn test_login_by_email() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("mail").await;

    let response = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({
                "email": format!("{}@example.com", user.user_name),
                "password": user.password,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("dup").await;
    let email = format!("{}@example.com", unique("other"));

    let response = app
        .multipart(
            "POST",
            "/api/v1/users/register",
            &[
                Part::Text("fullName", "Someone Else"),
                Part::Text("email", &email),
                Part::Text("userName", &user.user_name),
                Part::Text("password", "another-long-password"),
                Part::File {
                    name: "avatar",
                    file_name: "a.png",
                    content_type: "image/png",
                    data: PNG_BYTES,
                },
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_register_requires_avatar() {
    let Some(app) = TestApp::new().await else { return };
    let user_name = unique("noavatar");
    let email = format!("{user_name}@example.com");

    let response = app
        .multipart(
            "POST",
            "/api/v1/users/register",
            &[
                Part::Text("fullName", "No Avatar"),
                Part::Text("email", &email),
                Part::Text("userName", &user_name),
                Part::Text("password", "correct-horse-battery"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("wrongpw").await;

    let response = app.login(&user.user_name, "not-the-password").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.cookie("accessToken").is_none());
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let Some(app) = TestApp::new().await else { return };

    let response = app
        .request("GET", "/api/v1/users/current-user", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Unauthorized request");
}

#[tokio::test]
async fn test_access_token_cookie_authenticates() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("cookie").await;

    let response = app
        .request_with_cookie(
            "GET",
            "/api/v1/users/current-user",
            &format!("accessToken={}", user.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["id"], user.id.to_string());
}

#[tokio::test]
async fn test_refresh_rotation_detects_reuse() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("rotate").await;

    let first = app
        .request(
            "POST",
            "/api/v1/users/refresh-token",
            Some(json!({ "refreshToken": user.refresh_token })),
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    let rotated = first.data()["refreshToken"]
        .as_str()
        .expect("rotated refresh token")
        .to_string();
    assert_ne!(rotated, user.refresh_token);

    // Presenting the superseded token revokes the whole session.
    let reused = app
        .request(
            "POST",
            "/api/v1/users/refresh-token",
            Some(json!({ "refreshToken": user.refresh_token })),
            None,
        )
        .await;
    assert_eq!(reused.status, StatusCode::UNAUTHORIZED);

    let after = app
        .request(
            "POST",
            "/api/v1/users/refresh-token",
            Some(json!({ "refreshToken": rotated })),
            None,
        )
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_from_cookie() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("refcookie").await;

    let response = app
        .request_with_cookie(
            "POST",
            "/api/v1/users/refresh-token",
            &format!("refreshToken={}", user.refresh_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.cookie("refreshToken").is_some());
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("logout").await;

    let response = app
        .request("POST", "/api/v1/users/logout", None, Some(&user.access_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.set_cookie_header("accessToken").is_some());

    let after = app
        .request(
            "GET",
            "/api/v1/users/current-user",
            None,
            Some(&user.access_token),
        )
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);

    let refresh = app
        .request(
            "POST",
            "/api/v1/users/refresh-token",
            Some(json!({ "refreshToken": user.refresh_token })),
            None,
        )
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("chpw").await;

    let wrong = app
        .request(
            "POST",
            "/api/v1/users/change-password",
            Some(json!({ "oldPassword": "nope", "newPassword": "brand-new-passphrase" })),
            Some(&user.access_token),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);

    let ok = app
        .request(
            "POST",
            "/api/v1/users/change-password",
            Some(json!({
                "oldPassword": user.password,
                "newPassword": "brand-new-passphrase",
            })),
            Some(&user.access_token),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);

    let login = app.login(&user.user_name, "brand-new-passphrase").await;
    assert_eq!(login.status, StatusCode::OK);
}

async fn session_expiry(app: &TestApp, user_id: uuid::Uuid) -> DateTime<Utc> {
    sqlx::query_scalar::<_, DateTime<Utc>>("SELECT expires_at FROM sessions WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(app.db.pool())
        .await
        .expect("Failed to read session expiry")
}

#[tokio::test]
async fn test_refresh_extends_session_expiry() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("sliding").await;
    let before = session_expiry(&app, user.id).await;

    tokio::time::sleep(Duration::from_millis(50)).await;
    let refreshed = app
        .request(
            "POST",
            "/api/v1/users/refresh-token",
            Some(json!({ "refreshToken": user.refresh_token })),
            None,
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);

    let after = session_expiry(&app, user.id).await;
    assert!(after > before, "expiry {after} did not move past {before}");
}

#[tokio::test]
async fn test_malformed_bodies_use_error_envelope() {
    let Some(app) = TestApp::new().await else { return };

    let no_content_type = app
        .request_raw("POST", "/api/v1/users/login", None, r#"{"userName":"x"}"#)
        .await;
    assert_eq!(no_content_type.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(no_content_type.body["success"], false);
    assert_eq!(no_content_type.body["statusCode"], 415);

    let malformed = app
        .request_raw(
            "POST",
            "/api/v1/users/login",
            Some("application/json"),
            r#"{"userName": "#,
        )
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["success"], false);
    assert_eq!(malformed.body["statusCode"], 400);
    assert!(malformed.body["errors"].is_array());

    let not_multipart = app
        .request_raw(
            "POST",
            "/api/v1/users/register",
            Some("application/json"),
            "{}",
        )
        .await;
    assert_eq!(not_multipart.status, StatusCode::BAD_REQUEST);
    assert_eq!(not_multipart.body["success"], false);
}

#[tokio::test]
async fn test_avatar_extension_follows_content_type() {
    let Some(app) = TestApp::new().await else { return };
    let user_name = unique("evilname");
    let email = format!("{user_name}@example.com");

    let response = app
        .multipart(
            "POST",
            "/api/v1/users/register",
            &[
                Part::Text("fullName", "Evil Name"),
                Part::Text("email", &email),
                Part::Text("userName", &user_name),
                Part::Text("password", "correct-horse-battery"),
                Part::File {
                    name: "avatar",
                    file_name: "evil.html",
                    content_type: "image/png",
                    data: b"<script>alert(1)</script>",
                },
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let avatar = response.data()["avatar"].as_str().unwrap().to_string();
    assert!(avatar.ends_with(".png"), "unexpected avatar url {avatar}");

    let (status, content_type) = app.fetch(&avatar).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn test_register_rejects_svg_avatar() {
    let Some(app) = TestApp::new().await else { return };
    let user_name = unique("svgname");
    let email = format!("{user_name}@example.com");

    let response = app
        .multipart(
            "POST",
            "/api/v1/users/register",
            &[
                Part::Text("fullName", "Svg Name"),
                Part::Text("email", &email),
                Part::Text("userName", &user_name),
                Part::Text("password", "correct-horse-battery"),
                Part::File {
                    name: "avatar",
                    file_name: "a.svg",
                    content_type: "image/svg+xml",
                    data: b"<svg onload=\"alert(1)\"/>",
                },
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}
