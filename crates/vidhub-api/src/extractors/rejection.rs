//! `Json`, `Query` and `Path` wrappers whose rejections use the API error
//! envelope instead of axum's plain-text bodies.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Query string parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Path parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppPath<T>(pub T);

impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode, header};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct NamedBody {
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct Params {
        page: u64,
    }

    fn json_request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = HttpRequest::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_json_accepted() {
        let req = json_request(Some("application/json"), r#"{"name":"clip"}"#);
        let AppJson(body) = AppJson::<NamedBody>::from_request(req, &()).await.unwrap();
        assert_eq!(body.name, "clip");
    }

    #[tokio::test]
    async fn test_json_rejections_use_error_kinds() {
        let req = json_request(None, r#"{"name":"clip"}"#);
        let err = AppJson::<NamedBody>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let req = json_request(Some("application/json"), r#"{"name":"#);
        let err = AppJson::<NamedBody>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let req = json_request(Some("application/json"), r#"{"other":1}"#);
        let err = AppJson::<NamedBody>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.0.message.contains("name"));
    }

    #[tokio::test]
    async fn test_query_rejection() {
        let (mut parts, _) = HttpRequest::builder()
            .uri("/?page=99999999999999999999999")
            .body(())
            .unwrap()
            .into_parts();
        let err = AppQuery::<Params>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let (mut parts, _) = HttpRequest::builder()
            .uri("/?page=3")
            .body(())
            .unwrap()
            .into_parts();
        let AppQuery(params) = AppQuery::<Params>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(params.page, 3);
    }
}
