//! Documentation content: Markdown/MDX pages split into heading sections.

pub mod loader;
pub mod markdown;

use serde::{Deserialize, Serialize};

/// One documentation page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocPage {
    /// Site-relative URL, e.g. `/docs/routing`
    pub url: String,
    pub title: String,
    pub language: String,
    /// Plain text of the whole page
    pub content: String,
    pub sections: Vec<DocSection>,
}

/// Text between two headings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocSection {
    pub title: String,
    /// Fragment id of the heading; None for the text before the first heading.
    pub anchor: Option<String>,
    pub text: String,
}

impl DocSection {
    pub fn url(&self, page_url: &str) -> String {
        match &self.anchor {
            Some(anchor) => format!("{page_url}#{anchor}"),
            None => page_url.to_string(),
        }
    }
}

pub use loader::load_pages;
