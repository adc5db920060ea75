use axum::body::Bytes;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::{GithubConfig, ReleaseNotesConfig};
use crate::models::Release;

/// Failure talking to the release API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The API refused the request because the caller ran out of quota.
    #[error("upstream rate limit exceeded: {message}")]
    RateLimited { status: u16, message: String },
    /// Any other non-success status, passed through to our caller.
    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request to upstream failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid upstream payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// GitHub error bodies look like `{"message": "...", "documentation_url": "..."}`.
#[derive(Deserialize)]
struct GithubErrorBody {
    message: String,
}

/// Client for the GitHub releases list of one repository.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    releases_url: String,
    per_page: usize,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(
        http: reqwest::Client,
        github: &GithubConfig,
        release_notes: &ReleaseNotesConfig,
    ) -> Self {
        Self {
            http,
            releases_url: github.releases_url(),
            per_page: release_notes.max_releases,
            token: github.api_token.clone(),
        }
    }

    /// Fetch the newest releases exactly as the API returns them.
    pub async fn list_releases_raw(&self) -> Result<Vec<serde_json::Value>, UpstreamError> {
        let body = self.fetch_releases().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch the newest releases as typed records.
    pub async fn list_releases(&self) -> Result<Vec<Release>, UpstreamError> {
        let body = self.fetch_releases().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch_releases(&self) -> Result<Bytes, UpstreamError> {
        let mut req = self
            .http
            .get(&self.releases_url)
            .query(&[("per_page", self.per_page)])
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let quota_exhausted = resp
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.trim() == "0");
            let body = resp.text().await.unwrap_or_default();
            let message = upstream_message(status, &body);
            tracing::error!("Error fetching releases: {status} {message}");

            if is_rate_limited(status, quota_exhausted, &message) {
                return Err(UpstreamError::RateLimited {
                    status: status.as_u16(),
                    message,
                });
            }
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.bytes().await?)
    }
}

/// Message to surface for a failed upstream call: GitHub's own message when the
/// body carries one, the status reason otherwise.
fn upstream_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<GithubErrorBody>(body) {
        if !parsed.message.is_empty() {
            return parsed.message;
        }
    }
    status
        .canonical_reason()
        .unwrap_or("Upstream request failed")
        .to_string()
}

fn is_rate_limited(status: StatusCode, quota_exhausted: bool, message: &str) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }
    status == StatusCode::FORBIDDEN
        && (quota_exhausted || message.to_lowercase().contains("rate limit"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_prefers_github_body() {
        let body = r#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#;
        assert_eq!(upstream_message(StatusCode::NOT_FOUND, body), "Not Found");
    }

    #[test]
    fn test_upstream_message_falls_back_to_reason() {
        assert_eq!(
            upstream_message(StatusCode::SERVICE_UNAVAILABLE, "<html>down</html>"),
            "Service Unavailable"
        );
    }

    #[test]
    fn test_rate_limit_detection() {
        let msg = "API rate limit exceeded for 203.0.113.7.";
        assert!(is_rate_limited(StatusCode::FORBIDDEN, false, msg));
        assert!(is_rate_limited(StatusCode::FORBIDDEN, true, "Forbidden"));
        assert!(is_rate_limited(StatusCode::TOO_MANY_REQUESTS, false, ""));
        assert!(!is_rate_limited(StatusCode::FORBIDDEN, false, "Resource not accessible"));
        assert!(!is_rate_limited(StatusCode::SERVICE_UNAVAILABLE, true, msg));
    }
}
