use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;
use pulldown_cmark::{Options, Parser};
use std::sync::Arc;

use crate::models::{CompiledRelease, Release};

/// Turns a release body into renderable HTML.
pub trait BodyCompiler: Send + Sync {
    fn compile(&self, body: &str) -> Result<String>;
}

/// GitHub flavoured Markdown to HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownCompiler;

impl BodyCompiler for MarkdownCompiler {
    fn compile(&self, body: &str) -> Result<String> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let mut html = String::with_capacity(body.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, Parser::new_ext(body, options));
        Ok(html)
    }
}

/// Long display date, e.g. "March 5, 2024" for `en-US`.
pub fn format_display_date(date: &DateTime<Utc>, locale: &str) -> String {
    let pattern = match locale {
        "en-GB" | "en-AU" | "en-IE" | "en-NZ" => "%-d %B %Y",
        _ => "%B %-d, %Y",
    };
    date.format(pattern).to_string()
}

/// Compile every release concurrently. Either all succeed or the first error
/// is returned and nothing is kept.
pub async fn compile_releases(
    compiler: Arc<dyn BodyCompiler>,
    releases: &[Release],
    locale: &str,
) -> Result<Vec<CompiledRelease>> {
    try_join_all(releases.iter().cloned().map(|release| {
        let compiler = compiler.clone();
        let created_at = format_display_date(&release.created_at, locale);
        async move {
            let body = release.body.clone().unwrap_or_default();
            let html = tokio::task::spawn_blocking(move || compiler.compile(&body))
                .await
                .context("Release compile task panicked")?
                .with_context(|| format!("Failed to compile release {}", release.tag_name))?;

            Ok::<_, anyhow::Error>(CompiledRelease {
                id: release.id,
                tag_name: release.tag_name,
                name: release.name,
                html_url: release.html_url,
                created_at,
                body: html,
            })
        }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_display_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        assert_eq!(format_display_date(&date, "en-US"), "March 5, 2024");
        assert_eq!(format_display_date(&date, "en-GB"), "5 March 2024");
    }

    #[test]
    fn test_markdown_compiler_renders_gfm() {
        let html = MarkdownCompiler
            .compile("## Fixed\n\n- [x] ~~old~~ bug\n")
            .unwrap();
        assert!(html.contains("<h2>Fixed</h2>"));
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains("checkbox"));
    }
}
