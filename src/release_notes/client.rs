use reqwest::header::USER_AGENT;
use serde::Deserialize;
use std::sync::Arc;

use super::{FetchResult, ReleaseFeed};
use crate::models::Release;

/// Payload string older deployments of the endpoint sent instead of releases.
const RATE_LIMIT_SENTINEL: &str = "rate limit exceeded";

#[derive(Deserialize)]
struct EndpointBody {
    releases: Vec<Release>,
}

/// Fetches `/api/github-releases` the way the release notes page does.
#[derive(Debug, Clone)]
pub struct ReleaseNotesClient {
    http: reqwest::Client,
    endpoint: String,
    user_agent: Option<String>,
}

impl ReleaseNotesClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            user_agent: None,
        }
    }

    /// Send this user agent instead of the HTTP client's own.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub async fn fetch(&self) -> FetchResult {
        let mut req = self.http.get(&self.endpoint);
        if let Some(ua) = &self.user_agent {
            req = req.header(USER_AGENT, ua);
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("Release notes request failed: {e}");
                return FetchResult::Failed(format!("Failed to load releases: {e}"));
            }
        };

        let status = resp.status();
        match resp.json::<serde_json::Value>().await {
            Ok(body) => interpret_payload(status.is_success(), status.as_u16(), body),
            Err(e) => FetchResult::Failed(format!("Invalid release notes response: {e}")),
        }
    }
}

/// Map an endpoint response to a fetch result.
pub fn interpret_payload(success: bool, status: u16, body: serde_json::Value) -> FetchResult {
    let rate_limited = body
        .as_str()
        .is_some_and(|s| s.trim().eq_ignore_ascii_case(RATE_LIMIT_SENTINEL))
        || body.get("code").and_then(|c| c.as_str()) == Some("rate_limited");
    if rate_limited {
        return FetchResult::Fetched(Arc::new(ReleaseFeed::RateLimited));
    }

    if !success {
        let message = body
            .get("error")
            .and_then(|e| e.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Failed to load releases ({status})"));
        return FetchResult::Failed(message);
    }

    match serde_json::from_value::<EndpointBody>(body) {
        Ok(parsed) => FetchResult::Fetched(Arc::new(ReleaseFeed::Releases(parsed.releases))),
        Err(e) => FetchResult::Failed(format!("Invalid release notes response: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feed(result: FetchResult) -> ReleaseFeed {
        match result {
            FetchResult::Fetched(feed) => feed.as_ref().clone(),
            other => panic!("expected fetched, got {other:?}"),
        }
    }

    #[test]
    fn test_releases_payload() {
        let body = json!({
            "status": "ok",
            "releases": [
                { "id": 1, "tag_name": "v1.0.0", "created_at": "2023-05-01T00:00:00Z", "body": "x" }
            ]
        });
        match feed(interpret_payload(true, 200, body)) {
            ReleaseFeed::Releases(releases) => assert_eq!(releases[0].tag_name, "v1.0.0"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rate_limit_code_and_legacy_sentinel() {
        let typed = json!({ "error": "API rate limit exceeded", "code": "rate_limited" });
        assert_eq!(feed(interpret_payload(false, 403, typed)), ReleaseFeed::RateLimited);
        let legacy = json!("rate limit exceeded");
        assert_eq!(feed(interpret_payload(true, 200, legacy)), ReleaseFeed::RateLimited);
    }

    #[test]
    fn test_error_body_becomes_failure() {
        let body = json!({ "error": "Service Unavailable" });
        match interpret_payload(false, 503, body) {
            FetchResult::Failed(message) => assert_eq!(message, "Service Unavailable"),
            other => panic!("unexpected {other:?}"),
        }
        match interpret_payload(false, 502, json!(null)) {
            FetchResult::Failed(message) => assert!(message.contains("502")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
