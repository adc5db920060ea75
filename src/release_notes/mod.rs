//! Consumer side of the release notes pipeline.
//!
//! [`ReleaseNotes`] follows the result of fetching `/api/github-releases` and
//! turns it into one of three observable states: loading, error, or ready
//! with every release compiled.

pub mod client;
pub mod compile;
pub mod toc;
pub mod view;

use std::sync::Arc;

use crate::models::{CompiledRelease, Release};
use compile::{compile_releases, BodyCompiler};

pub use client::ReleaseNotesClient;
pub use compile::MarkdownCompiler;

pub const RATE_LIMIT_MESSAGE: &str =
    "Rate limit exceeded. Please try again later. Or check your API key.";

/// A successfully received payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseFeed {
    Releases(Vec<Release>),
    /// The upstream API refused to serve us for now.
    RateLimited,
}

/// Outcome of one fetch of the releases endpoint.
#[derive(Debug, Clone)]
pub enum FetchResult {
    Pending,
    Failed(String),
    Fetched(Arc<ReleaseFeed>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseNotesState {
    Loading,
    Error(String),
    Ready(Vec<CompiledRelease>),
}

pub struct ReleaseNotes {
    compiler: Arc<dyn BodyCompiler>,
    locale: String,
    state: ReleaseNotesState,
    last_feed: Option<Arc<ReleaseFeed>>,
}

impl ReleaseNotes {
    pub fn new(compiler: Arc<dyn BodyCompiler>, locale: impl Into<String>) -> Self {
        Self {
            compiler,
            locale: locale.into(),
            state: ReleaseNotesState::Loading,
            last_feed: None,
        }
    }

    pub fn state(&self) -> &ReleaseNotesState {
        &self.state
    }

    pub fn into_state(self) -> ReleaseNotesState {
        self.state
    }

    /// Feed a new fetch result in.
    ///
    /// Once in the error state nothing changes. The same feed (by identity)
    /// is only compiled once. A batch is published only if every release in
    /// it compiled.
    pub async fn apply(&mut self, result: FetchResult) -> &ReleaseNotesState {
        if matches!(self.state, ReleaseNotesState::Error(_)) {
            return &self.state;
        }

        match result {
            FetchResult::Pending => {}
            FetchResult::Failed(message) => {
                self.state = ReleaseNotesState::Error(message);
            }
            FetchResult::Fetched(feed) => {
                if self
                    .last_feed
                    .as_ref()
                    .is_some_and(|last| Arc::ptr_eq(last, &feed))
                {
                    return &self.state;
                }
                self.last_feed = Some(feed.clone());

                self.state = match feed.as_ref() {
                    ReleaseFeed::RateLimited => {
                        ReleaseNotesState::Error(RATE_LIMIT_MESSAGE.to_string())
                    }
                    ReleaseFeed::Releases(releases) => {
                        match compile_releases(self.compiler.clone(), releases, &self.locale).await
                        {
                            Ok(compiled) => ReleaseNotesState::Ready(compiled),
                            Err(e) => {
                                tracing::error!("Failed to compile release notes: {e:#}");
                                ReleaseNotesState::Error(format!(
                                    "Failed to compile release notes: {e}"
                                ))
                            }
                        }
                    }
                };
            }
        }

        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn release(id: u64, tag: &str, body: &str) -> Release {
        Release {
            id,
            tag_name: tag.to_string(),
            name: None,
            url: String::new(),
            html_url: format!("https://github.com/wpbones/WPBones/releases/tag/{tag}"),
            target_commitish: "master".to_string(),
            draft: false,
            prerelease: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            published_at: None,
            author: None,
            tarball_url: None,
            zipball_url: None,
            body: Some(body.to_string()),
        }
    }

    /// Fails on any body containing "boom", counts calls.
    #[derive(Default)]
    struct TestCompiler {
        calls: AtomicUsize,
    }

    impl BodyCompiler for TestCompiler {
        fn compile(&self, body: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if body.contains("boom") {
                anyhow::bail!("cannot compile");
            }
            Ok(format!("<p>{body}</p>"))
        }
    }

    #[tokio::test]
    async fn test_ready_after_all_compiled() {
        let mut notes = ReleaseNotes::new(Arc::new(MarkdownCompiler), "en-US");
        assert_eq!(notes.state(), &ReleaseNotesState::Loading);

        notes.apply(FetchResult::Pending).await;
        assert_eq!(notes.state(), &ReleaseNotesState::Loading);

        let feed = Arc::new(ReleaseFeed::Releases(vec![
            release(2, "v1.9.0", "**New** CLI"),
            release(1, "v1.8.0", "Fixes"),
        ]));
        let ReleaseNotesState::Ready(compiled) = notes.apply(FetchResult::Fetched(feed)).await
        else {
            panic!("expected ready state");
        };
        assert_eq!(compiled.len(), 2);
        assert_eq!(compiled[0].tag_name, "v1.9.0");
        assert_eq!(compiled[0].created_at, "January 15, 2024");
        assert!(compiled[0].body.contains("<strong>New</strong>"));
    }

    #[tokio::test]
    async fn test_one_failure_publishes_no_partial_list() {
        let mut notes = ReleaseNotes::new(Arc::new(TestCompiler::default()), "en-US");
        let feed = Arc::new(ReleaseFeed::Releases(vec![
            release(3, "v3", "ok"),
            release(2, "v2", "boom"),
            release(1, "v1", "ok"),
        ]));
        let state = notes.apply(FetchResult::Fetched(feed)).await;
        match state {
            ReleaseNotesState::Error(message) => assert!(message.contains("v2")),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_becomes_error() {
        let mut notes = ReleaseNotes::new(Arc::new(MarkdownCompiler), "en-US");
        let state = notes
            .apply(FetchResult::Fetched(Arc::new(ReleaseFeed::RateLimited)))
            .await;
        assert_eq!(state, &ReleaseNotesState::Error(RATE_LIMIT_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_error_state_is_sticky() {
        let compiler = Arc::new(TestCompiler::default());
        let mut notes = ReleaseNotes::new(compiler.clone(), "en-US");
        notes.apply(FetchResult::Failed("offline".to_string())).await;

        let feed = Arc::new(ReleaseFeed::Releases(vec![release(1, "v1", "ok")]));
        let state = notes.apply(FetchResult::Fetched(feed)).await;
        assert_eq!(state, &ReleaseNotesState::Error("offline".to_string()));
        assert_eq!(compiler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_same_feed_compiled_once() {
        let compiler = Arc::new(TestCompiler::default());
        let mut notes = ReleaseNotes::new(compiler.clone(), "en-US");
        let feed = Arc::new(ReleaseFeed::Releases(vec![
            release(2, "v2", "a"),
            release(1, "v1", "b"),
        ]));

        notes.apply(FetchResult::Fetched(feed.clone())).await;
        notes.apply(FetchResult::Fetched(feed.clone())).await;
        assert_eq!(compiler.calls.load(Ordering::SeqCst), 2);

        // Equal content but a new identity is recompiled
        let refreshed = Arc::new(feed.as_ref().clone());
        notes.apply(FetchResult::Fetched(refreshed)).await;
        assert_eq!(compiler.calls.load(Ordering::SeqCst), 4);
    }
}
