use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

use super::markdown::parse_page;
use super::DocPage;

/// Load every `.md` / `.mdx` page under `content_dir`, sorted by URL.
pub fn load_pages(content_dir: &Path, default_language: &str) -> Result<Vec<DocPage>> {
    if !content_dir.is_dir() {
        anyhow::bail!("Content directory {} does not exist", content_dir.display());
    }

    let mut pages = Vec::new();

    for entry in WalkDir::new(content_dir)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() || !is_page(entry.path()) {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(content_dir).unwrap_or(path);
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let fallback_title = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        pages.push(parse_page(
            &source,
            &page_url(relative),
            &fallback_title,
            default_language,
        ));
    }

    pages.sort_by(|a, b| a.url.cmp(&b.url));
    tracing::info!("Loaded {} documentation pages from {}", pages.len(), content_dir.display());
    Ok(pages)
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with(['.', '_'])
}

fn is_page(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("mdx")
    )
}

/// `docs/routing.mdx` becomes `/docs/routing`, `docs/index.mdx` becomes `/docs`.
fn page_url(relative: &Path) -> String {
    let mut parts: Vec<String> = relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    if parts.last().is_some_and(|p| p == "index") {
        parts.pop();
    }
    format!("/{}", parts.join("/"))
}
