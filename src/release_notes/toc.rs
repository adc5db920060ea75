use crate::models::{Release, TocEntry};

/// Table of contents for the release notes page, one third-level entry per
/// release, e.g. `v1.9.0 - Jan, 2024`.
pub fn toc_entries(releases: &[Release]) -> Vec<TocEntry> {
    releases
        .iter()
        .map(|release| TocEntry {
            value: format!(
                "{} - {}",
                release.tag_name,
                release.created_at.format("%b, %Y")
            ),
            depth: "3".to_string(),
            id: release.tag_name.clone(),
        })
        .collect()
}
