//! # wpbones-docs
//!
//! The dynamic half of the WP Bones documentation website: release notes
//! pulled from GitHub and full-text search over the documentation pages.
//!
//! ## Architecture
//!
//! Two independent, stateless request/response pipelines:
//!
//! ```text
//!   GET /api/github-releases                 GET /api/search?q=...
//!            │                                        │
//!            ▼                                        ▼
//!   ┌─────────────────┐                     ┌──────────────────┐
//!   │ user-agent gate │ 400 / 403           │ query validation │ 200 {error}
//!   └────────┬────────┘                     └────────┬─────────┘
//!            │                                       │
//!            ▼                                       ▼
//!   ┌─────────────────┐                     ┌──────────────────┐
//!   │ GitHub releases │ status passthrough  │ index (built on  │
//!   │  ?per_page=N    │ rate limit typed    │  first use) +    │
//!   └────────┬────────┘                     │ SearchContext    │
//!            │                              └────────┬─────────┘
//!            ▼                                       │ top `limit` hits
//!   { releases, status: "ok" }                       ▼
//!            │                              ┌──────────────────┐
//!            ▼                              │ resolve records, │
//!   ┌─────────────────┐                     │ section excerpts │
//!   │ ReleaseNotes    │ fan-out compile,    └────────┬─────────┘
//!   │ (loading/error/ │ publish all or none          ▼
//!   │  ready)         │                     [{ title, content, items }]
//!   └─────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for GitHub, release notes and search
//! - [`models`] - Shared data types: `Release`, `SearchResult`, `TocEntry`, ...
//! - [`github`] - GitHub releases client with typed upstream errors, bot detection
//! - [`release_notes`] - Release notes state machine, body compilation, TOC and HTML view
//! - [`content`] - Markdown/MDX loader splitting pages into heading sections
//! - [`search`] - In-memory tantivy index with per-request search context and excerpts
//! - [`api`] - Axum HTTP handlers and router
//! - [`state`] - Shared application state holding config, clients and the lazy index

pub mod api;
pub mod boilerplates;
pub mod config;
pub mod content;
pub mod github;
pub mod models;
pub mod release_notes;
pub mod search;
pub mod state;
