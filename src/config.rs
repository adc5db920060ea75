use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Base URL under which this service is reachable (used by server-rendered pages
    /// to call their own API)
    pub public_url: String,
    /// Root of the Markdown/MDX documentation tree
    pub content_dir: PathBuf,
    /// Display locale for dates
    pub locale: String,
    pub github: GithubConfig,
    pub release_notes: ReleaseNotesConfig,
    pub search: SearchConfig,
}

/// Where release data comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// `owner/name`
    pub repo: String,
    pub api_url: String,
    /// Explicit release list URL. If None, derived from `api_url` and `repo`.
    pub releases_url: Option<String>,
    /// Optional token, only raises the upstream rate limit.
    pub api_token: Option<String>,
    /// GitHub rejects requests without a user agent.
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseNotesConfig {
    /// Link to the full changelog
    pub url: String,
    /// Page size requested from the release API
    pub max_releases: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub query_keyword: String,
    pub limit_keyword: String,
    pub excerpt_length_keyword: String,
    pub min_query_length: usize,
    pub default_max_results: usize,
    /// Upper bound for a client supplied limit
    pub max_results: usize,
    /// Excerpt length in words
    pub default_excerpt_length: usize,
    /// Language assigned to pages whose front matter has none
    pub default_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            public_url: "http://127.0.0.1:3000".to_string(),
            content_dir: PathBuf::from("./content"),
            locale: "en-US".to_string(),
            github: GithubConfig::default(),
            release_notes: ReleaseNotesConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            repo: "wpbones/wpbones".to_string(),
            api_url: "https://api.github.com".to_string(),
            releases_url: None,
            api_token: None,
            user_agent: concat!("wpbones-docs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for ReleaseNotesConfig {
    fn default() -> Self {
        Self {
            url: "https://github.com/wpbones/WPBones/releases".to_string(),
            max_releases: 10,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query_keyword: "q".to_string(),
            limit_keyword: "limit".to_string(),
            excerpt_length_keyword: "excerptLength".to_string(),
            min_query_length: 3,
            default_max_results: 5,
            max_results: 20,
            default_excerpt_length: 30,
            default_language: "en".to_string(),
        }
    }
}

impl GithubConfig {
    pub fn releases_url(&self) -> String {
        match &self.releases_url {
            Some(url) => url.clone(),
            None => format!(
                "{}/repos/{}/releases",
                self.api_url.trim_end_matches('/'),
                self.repo
            ),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("DOCS_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(url) = std::env::var("DOCS_PUBLIC_URL") {
            config.public_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(dir) = std::env::var("DOCS_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        if let Ok(locale) = std::env::var("DOCS_LOCALE") {
            config.locale = locale;
        }

        // GitHub
        if let Ok(repo) = std::env::var("GITHUB_REPO") {
            config.github.repo = repo;
        }
        if let Ok(url) = std::env::var("GITHUB_API_URL") {
            config.github.api_url = url;
        }
        if let Ok(url) = std::env::var("GITHUB_RELEASES_URL") {
            config.github.releases_url = Some(url);
        }
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.is_empty() {
                config.github.api_token = Some(token);
            }
        }

        // Release notes
        if let Ok(url) = std::env::var("RELEASE_NOTES_URL") {
            config.release_notes.url = url;
        }
        if let Ok(val) = std::env::var("RELEASE_NOTES_MAX") {
            if let Ok(v) = val.parse() {
                config.release_notes.max_releases = v;
            }
        }

        // Search
        if let Ok(val) = std::env::var("SEARCH_MIN_QUERY_LENGTH") {
            if let Ok(v) = val.parse() {
                config.search.min_query_length = v;
            }
        }
        if let Ok(val) = std::env::var("SEARCH_DEFAULT_MAX_RESULTS") {
            if let Ok(v) = val.parse() {
                config.search.default_max_results = v;
            }
        }
        if let Ok(val) = std::env::var("SEARCH_MAX_RESULTS") {
            if let Ok(v) = val.parse() {
                config.search.max_results = v;
            }
        }
        if let Ok(val) = std::env::var("SEARCH_DEFAULT_EXCERPT_LENGTH") {
            if let Ok(v) = val.parse() {
                config.search.default_excerpt_length = v;
            }
        }
        if let Ok(lang) = std::env::var("SEARCH_DEFAULT_LANGUAGE") {
            config.search.default_language = lang;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_releases_url_derived_from_repo() {
        let github = GithubConfig::default();
        assert_eq!(
            github.releases_url(),
            "https://api.github.com/repos/wpbones/wpbones/releases"
        );
    }

    #[test]
    fn test_releases_url_override_wins() {
        let github = GithubConfig {
            releases_url: Some("http://127.0.0.1:9999/releases".to_string()),
            ..GithubConfig::default()
        };
        assert_eq!(github.releases_url(), "http://127.0.0.1:9999/releases");
    }

    #[test]
    fn test_search_defaults() {
        let search = SearchConfig::default();
        assert_eq!(search.query_keyword, "q");
        assert_eq!(search.min_query_length, 3);
        assert_eq!(search.default_max_results, 5);
        assert_eq!(search.default_excerpt_length, 30);
    }
}
