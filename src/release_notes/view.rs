use std::fmt::Write;

use super::ReleaseNotesState;
use crate::search::excerpt::escape_html;

/// Render the release notes state as an HTML fragment.
///
/// An empty ready list renders the loading placeholder.
pub fn render_release_notes(state: &ReleaseNotesState, changelog_url: &str) -> String {
    let releases = match state {
        ReleaseNotesState::Error(message) => {
            return format!(
                "<div class=\"release-notes-error\" role=\"alert\">\
                 <strong>Failed to load releases</strong><p>{}</p></div>",
                escape_html(message)
            );
        }
        ReleaseNotesState::Loading => return loading(),
        ReleaseNotesState::Ready(releases) if releases.is_empty() => return loading(),
        ReleaseNotesState::Ready(releases) => releases,
    };

    let mut html = String::from("<div class=\"release-notes\">");
    for release in releases {
        let tag = escape_html(&release.tag_name);
        // Body is compiler output and goes in unescaped
        let _ = write!(
            html,
            "<article id=\"{tag}\" class=\"release\">\
             <header><span class=\"badge\">{tag}</span><time>{}</time></header>\
             {}</article>",
            escape_html(&release.created_at),
            release.body
        );
    }
    let _ = write!(
        html,
        "<a class=\"changelog\" href=\"{}\">View full changelog on GitHub</a></div>",
        escape_html(changelog_url)
    );
    html
}

fn loading() -> String {
    "<div class=\"release-notes-loading\"><p>Loading releases...</p></div>".to_string()
}
