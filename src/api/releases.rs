use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Html;
use axum::Json;
use std::sync::Arc;

use super::ApiError;
use crate::github::is_automated_client;
use crate::models::{ReleasesEnvelope, TocEntry};
use crate::release_notes::toc::toc_entries;
use crate::release_notes::view::render_release_notes;
use crate::release_notes::{MarkdownCompiler, ReleaseNotes, ReleaseNotesClient};
use crate::state::AppState;

fn user_agent(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
}

/// GET /api/github-releases - Newest releases of the framework, straight from GitHub.
///
/// Requests without a user agent, or from bots and crawlers, are refused
/// before anything is sent upstream.
pub async fn github_releases(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ReleasesEnvelope<serde_json::Value>>, ApiError> {
    let user_agent = user_agent(&headers)
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "User agent not found"))?;

    if is_automated_client(user_agent) {
        tracing::info!("Refused release list to automated client: {user_agent}");
        return Err(ApiError::new(StatusCode::FORBIDDEN, "Bots are not allowed"));
    }

    let releases = state.github.list_releases_raw().await?;
    tracing::debug!("Serving {} releases", releases.len());
    Ok(Json(ReleasesEnvelope::ok(releases)))
}

/// GET /api/release-notes/toc - One table-of-contents entry per release.
pub async fn release_notes_toc(
    State(state): State<AppState>,
) -> Result<Json<Vec<TocEntry>>, ApiError> {
    let releases = state.github.list_releases().await?;
    Ok(Json(toc_entries(&releases)))
}

/// GET /release-notes - Compiled release notes as an HTML fragment.
///
/// Goes through this service's own `/api/github-releases`, forwarding the
/// caller's user agent so the same bot filter applies.
pub async fn release_notes_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Html<String> {
    let endpoint = format!(
        "{}/api/github-releases",
        state.config.public_url.trim_end_matches('/')
    );
    let mut client = ReleaseNotesClient::new(state.http_client.clone(), endpoint);
    if let Some(ua) = user_agent(&headers) {
        client = client.with_user_agent(ua);
    }

    let mut notes = ReleaseNotes::new(Arc::new(MarkdownCompiler), state.config.locale.clone());
    notes.apply(client.fetch().await).await;

    Html(render_release_notes(
        notes.state(),
        &state.config.release_notes.url,
    ))
}
