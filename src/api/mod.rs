//! Axum handlers and the router that mounts them.

pub mod releases;
pub mod search;
pub mod site;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::github::UpstreamError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/github-releases", get(releases::github_releases))
        .route("/api/release-notes/toc", get(releases::release_notes_toc))
        .route("/release-notes", get(releases::release_notes_page))
        .route("/api/search", get(search::search))
        .route("/api/docs-index", get(site::docs_index))
        .route("/api/version", get(site::version))
        .route("/api/boilerplates", get(site::boilerplates))
        .with_state(state)
}

/// JSON error body: `{ "error": ..., "details"?: ..., "code"?: ... }`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

/// A handler failure rendered as a status plus [`ErrorBody`].
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                details: None,
                code: None,
            },
        }
    }

    pub fn internal(details: impl Into<String>) -> Self {
        let mut err = Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        err.body.details = Some(details.into());
        err
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.body.code = Some(code);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::RateLimited { status, message } => {
                ApiError::new(passthrough(status), message).with_code("rate_limited")
            }
            UpstreamError::Status { status, message } => ApiError::new(passthrough(status), message),
            other => {
                tracing::error!("Release fetch failed: {other}");
                ApiError::internal(other.to_string())
            }
        }
    }
}

fn passthrough(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_passed_through() {
        let err = ApiError::from(UpstreamError::Status {
            status: 503,
            message: "Service Unavailable".to_string(),
        });
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.body.error, "Service Unavailable");
        assert!(err.body.code.is_none());
    }

    #[test]
    fn test_rate_limit_carries_code() {
        let err = ApiError::from(UpstreamError::RateLimited {
            status: 403,
            message: "API rate limit exceeded".to_string(),
        });
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.body.code, Some("rate_limited"));
    }

    #[test]
    fn test_decode_failure_is_internal() {
        let decode = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = ApiError::from(UpstreamError::Decode(decode));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.error, "Internal server error");
        assert!(err.body.details.is_some());
    }

    #[test]
    fn test_error_body_omits_empty_fields() {
        let json = serde_json::to_value(ApiError::new(StatusCode::OK, "nope").body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "nope" }));
    }
}
