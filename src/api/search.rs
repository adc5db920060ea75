use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::collections::HashMap;

use super::ApiError;
use crate::models::SearchResult;
use crate::search::SearchContext;
use crate::state::AppState;

/// GET /api/search - Documentation search.
///
/// A missing or too short query is answered with a 200 carrying an `error`
/// field and never reaches the index. Parameter names come from the config
/// (`q`, `limit`, `excerptLength` by default).
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let cfg = &state.config.search;

    let Some(query) = params.get(&cfg.query_keyword) else {
        return ApiError::new(StatusCode::OK, "No search query provided").into_response();
    };
    if query.chars().count() < cfg.min_query_length {
        return ApiError::new(StatusCode::OK, "Search query too short").into_response();
    }

    let limit = parse_count(params.get(&cfg.limit_keyword), cfg.default_max_results)
        .clamp(1, cfg.max_results.max(1));
    let excerpt_length = parse_count(
        params.get(&cfg.excerpt_length_keyword),
        cfg.default_excerpt_length,
    );

    match run_search(&state, query, limit, excerpt_length).await {
        Ok(results) => Json(results).into_response(),
        Err(e) => {
            tracing::error!("Search error: {e:#}");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Search failed").into_response()
        }
    }
}

/// Query the index and flatten each hit into a [`SearchResult`].
pub async fn run_search(
    state: &AppState,
    query: &str,
    limit: usize,
    excerpt_length: usize,
) -> anyhow::Result<Vec<SearchResult>> {
    let index = state.search_index().await?;
    let mut ctx = SearchContext::new(state.config.search.default_language.clone(), excerpt_length);
    let query = query.to_string();

    tokio::task::spawn_blocking(move || {
        let hits = index.search(&mut ctx, &query, limit)?;
        hits.iter()
            .map(|hit| index.load(&ctx, hit).map(SearchResult::from))
            .collect::<anyhow::Result<Vec<_>>>()
    })
    .await
    .context("Search task panicked")?
}

fn parse_count(raw: Option<&String>, default: usize) -> usize {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(Some(&"7".to_string()), 5), 7);
        assert_eq!(parse_count(Some(&" 12 ".to_string()), 5), 12);
        assert_eq!(parse_count(Some(&"lots".to_string()), 5), 5);
        assert_eq!(parse_count(None, 30), 30);
    }
}
