//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use vidhub_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig, StorageConfig,
};
use vidhub_database::DatabasePool;

/// Environment variable naming the test database.
pub const TEST_DATABASE_URL: &str = "VIDHUB_TEST_DATABASE_URL";

const MULTIPART_BOUNDARY: &str = "vidhub-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Direct database access for asserting stored state
    pub db: DatabasePool,
    _media_dir: TempDir,
}

/// A registered and logged-in user.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub user_name: String,
    pub password: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// One part of a multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of the response envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// Value of a cookie set by the response.
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.set_cookie_header(name).and_then(|header| {
            header
                .split(';')
                .next()
                .and_then(|pair| pair.split_once('='))
                .map(|(_, value)| value.to_string())
        })
    }

    /// The raw `Set-Cookie` header for a cookie.
    pub fn set_cookie_header(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .map(String::from)
    }
}

/// A unique, lowercase name with the given prefix.
pub fn unique(prefix: &str) -> String {
    format!("{prefix}{}", &Uuid::new_v4().simple().to_string()[..12])
}

/// Bytes standing in for an image upload.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n-test-image";
/// Bytes standing in for a video upload.
pub const MP4_BYTES: &[u8] = b"\x00\x00\x00\x18ftypmp42-test-video";

impl TestApp {
    /// Create a new test application, or `None` when no test database is configured.
    pub async fn new() -> Option<Self> {
        let Ok(url) = std::env::var(TEST_DATABASE_URL) else {
            eprintln!("{TEST_DATABASE_URL} not set; skipping");
            return None;
        };

        let media_dir = TempDir::new().expect("Failed to create media dir");
        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url,
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 10,
                idle_timeout_seconds: 60,
            },
            auth: AuthConfig {
                access_token_secret: "test-access-secret".to_string(),
                refresh_token_secret: "test-refresh-secret".to_string(),
                cookie_secure: false,
                ..AuthConfig::default()
            },
            storage: StorageConfig {
                root_path: media_dir.path().to_string_lossy().into_owned(),
                ..StorageConfig::default()
            },
            logging: LoggingConfig::default(),
        };

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        vidhub_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let state = vidhub_api::build_state(config, db.clone())
            .await
            .expect("Failed to build state");

        Some(Self {
            router: vidhub_api::build_app(state),
            db,
            _media_dir: media_dir,
        })
    }

    /// Register a user with an avatar and log them in.
    pub async fn create_user(&self, prefix: &str) -> TestUser {
        let user_name = unique(prefix);
        let password = "correct-horse-battery".to_string();
        let email = format!("{user_name}@example.com");

        let response = self
            .multipart(
                "POST",
                "/api/v1/users/register",
                &[
                    Part::Text("fullName", "Test User"),
                    Part::Text("email", &email),
                    Part::Text("userName", &user_name),
                    Part::Text("password", &password),
                    Part::File {
                        name: "avatar",
                        file_name: "avatar.png",
                        content_type: "image/png",
                        data: PNG_BYTES,
                    },
                ],
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );
        let id = response.data()["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("No id in register response");

        let login = self.login(&user_name, &password).await;
        assert_eq!(login.status, StatusCode::OK, "Login failed: {:?}", login.body);

        TestUser {
            id,
            access_token: login.data()["accessToken"]
                .as_str()
                .expect("No accessToken")
                .to_string(),
            refresh_token: login.data()["refreshToken"]
                .as_str()
                .expect("No refreshToken")
                .to_string(),
            user_name,
            password,
        }
    }

    /// Log in by user name.
    pub async fn login(&self, user_name: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/v1/users/login",
            Some(serde_json::json!({ "userName": user_name, "password": password })),
            None,
        )
        .await
    }

    /// Publish a video owned by `user` and return its id.
    pub async fn publish_video(&self, user: &TestUser, title: &str) -> Uuid {
        let response = self
            .multipart(
                "POST",
                "/api/v1/videos",
                &[
                    Part::Text("title", title),
                    Part::Text("description", "A test video"),
                    Part::Text("duration", "12.5"),
                    Part::File {
                        name: "videoFile",
                        file_name: "clip.mp4",
                        content_type: "video/mp4",
                        data: MP4_BYTES,
                    },
                    Part::File {
                        name: "thumbnail",
                        file_name: "thumb.png",
                        content_type: "image/png",
                        data: PNG_BYTES,
                    },
                ],
                Some(&user.access_token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Publish failed: {:?}",
            response.body
        );
        response.data()["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("No id in publish response")
    }

    /// Make a JSON request authenticated with a Bearer token.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    /// Make a request carrying only a `Cookie` header.
    pub async fn request_with_cookie(&self, method: &str, path: &str, cookie: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(COOKIE, cookie)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Make a request with a raw body and an explicit content type.
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        content_type: Option<&str>,
        body: &'static str,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(content_type) = content_type {
            req = req.header(CONTENT_TYPE, content_type);
        }
        self.send(req.body(Body::from(body)).expect("Failed to build request"))
            .await
    }

    /// Fetch a path and return the status and `Content-Type` without parsing the body.
    pub async fn fetch(&self, path: &str) -> (StatusCode, Option<String>) {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        (response.status(), content_type)
    }

    /// Make a multipart request.
    pub async fn multipart(
        &self,
        method: &str,
        path: &str,
        parts: &[Part<'_>],
        token: Option<&str>,
    ) -> TestResponse {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File {
                    name,
                    file_name,
                    content_type,
                    data,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        let mut req = Request::builder().method(method).uri(path).header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        );
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body)).expect("Failed to build request"))
            .await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}
