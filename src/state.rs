use anyhow::Context;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::config::Config;
use crate::github::GithubClient;
use crate::search::SearchIndex;

/// Shared application state. Everything in it is read-only once built.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub github: GithubClient,
    search_index: Arc<OnceCell<Arc<SearchIndex>>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.github.user_agent.as_str())
            .build()?;
        let github = GithubClient::new(http_client.clone(), &config.github, &config.release_notes);

        Ok(Self {
            config,
            http_client,
            github,
            search_index: Arc::new(OnceCell::new()),
        })
    }

    /// The documentation index, built from the content directory on first use.
    /// A failed build is not cached; the next caller tries again.
    pub async fn search_index(&self) -> anyhow::Result<Arc<SearchIndex>> {
        let index = self
            .search_index
            .get_or_try_init(|| async {
                let content_dir = self.config.content_dir.clone();
                let language = self.config.search.default_language.clone();
                tracing::info!("Building search index from {}", content_dir.display());
                let index = tokio::task::spawn_blocking(move || {
                    SearchIndex::from_content_dir(&content_dir, &language)
                })
                .await
                .context("Index build task panicked")??;
                Ok::<_, anyhow::Error>(Arc::new(index))
            })
            .await?;
        Ok(index.clone())
    }

    /// Whether the search index has been built yet.
    pub fn search_index_ready(&self) -> bool {
        self.search_index.initialized()
    }
}
