//! Request extractors
//!
//! Wrappers over axum's `Json`, `Query` and `Path` whose rejections are
//! [`AppError`]s, so malformed input gets the same JSON envelope as every
//! other failure instead of axum's plain-text body.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use http::request::Parts;
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};

/// JSON request body
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

/// URL query string
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

/// Path parameters
#[derive(Debug)]
pub struct PathParam<T>(pub T);

fn reject(code: ErrorCode, reason: String) -> AppError {
    tracing::debug!(code = %code, reason = %reason, "Request rejected by extractor");
    AppError::new(code).with_detail("reason", reason)
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let code = match &rejection {
        // Well-formed JSON that does not fit the request type
        JsonRejection::JsonDataError(_) => ErrorCode::ValidationFailed,
        JsonRejection::JsonSyntaxError(_) => ErrorCode::InvalidFormat,
        _ => ErrorCode::InvalidRequest,
    };
    reject(code, rejection.body_text())
}

fn query_rejection(rejection: QueryRejection) -> AppError {
    reject(ErrorCode::InvalidFormat, rejection.body_text())
}

fn path_rejection(rejection: PathRejection) -> AppError {
    let code = match &rejection {
        PathRejection::FailedToDeserializePathParams(_) => ErrorCode::InvalidFormat,
        // Handler wired to a route without the parameter
        _ => ErrorCode::InternalError,
    };
    reject(code, rejection.body_text())
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        Ok(Self(value))
    }
}

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) = axum::extract::Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection)?;
        Ok(Self(value))
    }
}

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) = axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::routing::{get, post};
    use http::StatusCode;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Party {
        size: i32,
    }

    #[derive(Deserialize)]
    struct Paging {
        page: Option<u32>,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/party",
                post(|JsonBody(party): JsonBody<Party>| async move { party.size.to_string() }),
            )
            .route(
                "/items/{id}",
                get(|PathParam(id): PathParam<i64>| async move { id.to_string() }),
            )
            .route(
                "/items",
                get(|QueryParams(q): QueryParams<Paging>| async move {
                    q.page.unwrap_or(1).to_string()
                }),
            )
    }

    async fn envelope(request: http::Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn json_post(body: &'static str) -> http::Request<Body> {
        http::Request::post("/party")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_input_passes_through() {
        let response = app().oneshot(json_post(r#"{"size":3}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app()
            .oneshot(http::Request::get("/items/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_broken_json_uses_envelope() {
        let (status, json) = envelope(json_post("{\"size\":")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], ErrorCode::InvalidFormat.code());
        assert!(json["details"]["reason"].is_string());
    }

    #[tokio::test]
    async fn test_wrong_json_shape_is_validation_failure() {
        let (status, json) = envelope(json_post(r#"{"size":"four"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], ErrorCode::ValidationFailed.code());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_invalid_request() {
        let request = http::Request::post("/party")
            .body(Body::from(r#"{"size":3}"#))
            .unwrap();
        let (status, json) = envelope(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], ErrorCode::InvalidRequest.code());
    }

    #[tokio::test]
    async fn test_bad_path_and_query_are_invalid_format() {
        let request = http::Request::get("/items/abc").body(Body::empty()).unwrap();
        let (status, json) = envelope(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], ErrorCode::InvalidFormat.code());

        let request = http::Request::get("/items?page=-2").body(Body::empty()).unwrap();
        let (status, json) = envelope(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], ErrorCode::InvalidFormat.code());
    }
}
