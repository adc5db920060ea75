use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Author of a GitHub release
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub site_admin: bool,
}

/// A tagged release as returned by the GitHub releases API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub target_commitish: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub tarball_url: Option<String>,
    #[serde(default)]
    pub zipball_url: Option<String>,
    /// Markdown changelog
    #[serde(default)]
    pub body: Option<String>,
}

/// Successful body of GET /api/github-releases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleasesEnvelope<T> {
    pub releases: Vec<T>,
    pub status: String,
}

impl<T> ReleasesEnvelope<T> {
    pub fn ok(releases: Vec<T>) -> Self {
        Self {
            releases,
            status: "ok".to_string(),
        }
    }
}

/// A release ready to display: formatted date and compiled body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompiledRelease {
    pub id: u64,
    pub tag_name: String,
    pub name: Option<String>,
    pub html_url: String,
    /// Locale formatted creation date, e.g. "March 5, 2024"
    pub created_at: String,
    /// Body rendered to HTML
    pub body: String,
}

/// Table-of-contents entry for the release notes page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TocEntry {
    pub value: String,
    pub depth: String,
    pub id: String,
}

/// One search result, flattened from a full index record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub content: String,
    pub items: Vec<SearchResultItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    pub title: String,
    pub url: String,
    pub excerpt: String,
}

/// Page listing returned by GET /api/docs-index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocsIndexEntry {
    pub path: String,
    pub title: String,
    /// Section anchor (empty for the page intro) to section text
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
}

/// A starter project advertised on the website
#[derive(Debug, Clone, Serialize)]
pub struct Boilerplate {
    pub slug: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub icon: BoilerplateIcon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<Shortcut>,
    pub keywords: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BoilerplateIcon {
    /// Image file name
    File(&'static str),
    /// Built-in icon
    Source { source: &'static str },
}

#[derive(Debug, Clone, Serialize)]
pub struct Shortcut {
    pub modifiers: &'static [&'static str],
    pub key: &'static str,
}
