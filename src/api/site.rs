use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::boilerplates::BOILERPLATES;
use crate::content::DocPage;
use crate::models::{Boilerplate, DocsIndexEntry, VersionInfo};
use crate::state::AppState;

/// GET /api/version
pub async fn version() -> Json<VersionInfo> {
    Json(VersionInfo {
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/boilerplates
pub async fn boilerplates() -> Json<&'static [Boilerplate]> {
    Json(BOILERPLATES)
}

#[derive(Debug, Deserialize)]
pub struct DocsIndexQuery {
    pub keyword: Option<String>,
}

/// GET /api/docs-index - Every documentation page with its sections,
/// optionally filtered by a case-insensitive keyword.
pub async fn docs_index(
    State(state): State<AppState>,
    Query(params): Query<DocsIndexQuery>,
) -> Result<Json<Vec<DocsIndexEntry>>, ApiError> {
    let index = state.search_index().await.map_err(|e| {
        tracing::error!("Error loading documentation index: {e:#}");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching data")
    })?;

    let keyword = params
        .keyword
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty());

    let entries = index
        .pages()
        .iter()
        .filter(|page| keyword.as_deref().map_or(true, |k| page_matches(page, k)))
        .map(|page| DocsIndexEntry {
            path: page.url.clone(),
            title: page.title.clone(),
            data: page
                .sections
                .iter()
                .map(|s| (s.anchor.clone().unwrap_or_default(), s.text.clone()))
                .collect(),
        })
        .collect();

    Ok(Json(entries))
}

fn page_matches(page: &DocPage, keyword: &str) -> bool {
    page.title.to_lowercase().contains(keyword)
        || page
            .sections
            .iter()
            .any(|s| s.text.to_lowercase().contains(keyword))
}
