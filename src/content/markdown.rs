use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;
use yaml_rust::{Yaml, YamlLoader};

use super::{DocPage, DocSection};

/// Fields read from a `---` delimited front matter block.
#[derive(Debug, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub lang: Option<String>,
}

/// Parse one Markdown/MDX source into a page.
///
/// The title comes from front matter, then the first `#` heading, then
/// `fallback_title`. Every heading of level 2 or deeper starts a new section.
pub fn parse_page(source: &str, url: &str, fallback_title: &str, default_language: &str) -> DocPage {
    let (front, body) = split_front_matter(source);
    let body = strip_mdx_statements(body);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let mut h1: Option<String> = None;
    let mut slugs = Slugger::default();
    let mut sections: Vec<DocSection> = Vec::new();
    let mut current = DocSection {
        title: String::new(),
        anchor: None,
        text: String::new(),
    };
    let mut heading: Option<(HeadingLevel, Option<String>, String)> = None;

    for event in Parser::new_ext(&body, options) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                heading = Some((level, id.map(|s| s.to_string()), String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some((level, id, text)) = heading.take() else {
                    continue;
                };
                let text = collapse_whitespace(&text);
                if level == HeadingLevel::H1 {
                    if h1.is_none() {
                        h1 = Some(text);
                    }
                    continue;
                }
                let finished = std::mem::replace(
                    &mut current,
                    DocSection {
                        anchor: Some(slugs.slug(id.as_deref().unwrap_or(&text))),
                        title: text,
                        text: String::new(),
                    },
                );
                push_section(&mut sections, finished);
            }
            Event::Text(t) | Event::Code(t) => match heading.as_mut() {
                Some((_, _, buf)) => buf.push_str(&t),
                None => current.text.push_str(&t),
            },
            Event::SoftBreak | Event::HardBreak => match heading.as_mut() {
                Some((_, _, buf)) => buf.push(' '),
                None => current.text.push(' '),
            },
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell
                | TagEnd::BlockQuote(_),
            ) => current.text.push(' '),
            // JSX components and raw HTML carry no searchable prose
            _ => {}
        }
    }
    push_section(&mut sections, current);

    let title = front
        .title
        .or(h1)
        .unwrap_or_else(|| fallback_title.to_string());
    for section in sections.iter_mut().filter(|s| s.anchor.is_none()) {
        section.title = title.clone();
    }

    let content = sections
        .iter()
        .map(|s| {
            if s.anchor.is_some() {
                format!("{} {}", s.title, s.text)
            } else {
                s.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    DocPage {
        url: url.to_string(),
        title,
        language: front
            .lang
            .unwrap_or_else(|| default_language.to_string()),
        content: collapse_whitespace(&content),
        sections,
    }
}

fn push_section(sections: &mut Vec<DocSection>, mut section: DocSection) {
    section.text = collapse_whitespace(&section.text);
    // An intro with no text is dropped; an empty heading section is kept so it stays addressable
    if section.anchor.is_none() && section.text.is_empty() {
        return;
    }
    sections.push(section);
}

/// Split a leading `---` front matter block from the document body.
pub fn split_front_matter(source: &str) -> (FrontMatter, &str) {
    let source = source.trim_start_matches('\u{feff}');
    let Some(rest) = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
    else {
        return (FrontMatter::default(), source);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        if line.trim() == "---" {
            return (parse_front_matter(&rest[..start]), &rest[offset..]);
        }
    }

    // Unterminated block: treat the whole file as body
    (FrontMatter::default(), source)
}

fn parse_front_matter(yaml: &str) -> FrontMatter {
    let docs = match YamlLoader::load_from_str(yaml) {
        Ok(docs) => docs,
        Err(e) => {
            tracing::warn!("Ignoring malformed front matter: {e}");
            return FrontMatter::default();
        }
    };
    let Some(doc) = docs.first() else {
        return FrontMatter::default();
    };

    FrontMatter {
        title: scalar(&doc["title"]),
        lang: scalar(&doc["lang"]).or_else(|| scalar(&doc["language"])),
    }
}

fn scalar(value: &Yaml) -> Option<String> {
    let text = match value {
        Yaml::String(s) | Yaml::Real(s) => s.trim().to_string(),
        Yaml::Integer(i) => i.to_string(),
        Yaml::Boolean(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Drop MDX `import`/`export` lines that are not inside a fenced code block.
fn strip_mdx_statements(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut in_fence = false;
    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        }
        if !in_fence && (trimmed.starts_with("import ") || trimmed.starts_with("export ")) {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// GitHub style heading ids, with `-1`, `-2`... suffixes for repeats.
///
/// Every emitted id is recorded, so a suffixed id never collides with a
/// heading whose own slug already looks like one.
#[derive(Default)]
struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut slug = base.clone();
        while self.seen.contains_key(&slug) {
            let count = self.seen.entry(base.clone()).or_insert(0);
            *count += 1;
            slug = format!("{base}-{count}");
        }
        self.seen.insert(slug.clone(), 0);
        slug
    }
}

pub fn slugify(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            c if c.is_whitespace() => Some('-'),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTING: &str = "---\ntitle: Routing\n---\n\nimport { Callout } from 'nextra/components'\n\n# Routes\n\nWP Bones routes map admin menus to controllers.\n\n## Defining routes\n\nAdd a `routes` array in `config/menus.php`.\n\n```php\nimport Foo;\n```\n\n## Route parameters\n\n<Callout>\nignored\n</Callout>\n\nParameters are passed to the controller method.\n";

    #[test]
    fn test_front_matter_title_wins() {
        let page = parse_page(ROUTING, "/docs/routing", "routing", "en");
        assert_eq!(page.title, "Routing");
        assert_eq!(page.language, "en");
    }

    #[test]
    fn test_sections_split_at_headings() {
        let page = parse_page(ROUTING, "/docs/routing", "routing", "en");
        let titles: Vec<&str> = page.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Routing", "Defining routes", "Route parameters"]);
        assert_eq!(page.sections[0].anchor, None);
        assert_eq!(page.sections[1].anchor.as_deref(), Some("defining-routes"));
        assert_eq!(page.sections[2].url("/docs/routing"), "/docs/routing#route-parameters");
    }

    #[test]
    fn test_mdx_imports_stripped_but_code_kept() {
        let page = parse_page(ROUTING, "/docs/routing", "routing", "en");
        assert!(!page.content.contains("nextra/components"));
        assert!(page.sections[1].text.contains("import Foo;"));
        assert!(!page.content.contains("ignored"));
    }

    #[test]
    fn test_h1_used_without_front_matter() {
        let page = parse_page("# Hooks\n\nActions and filters.\n", "/docs/hooks", "hooks", "en");
        assert_eq!(page.title, "Hooks");
        assert_eq!(page.content, "Actions and filters.");
    }

    #[test]
    fn test_fallback_title_and_language() {
        let page = parse_page("---\nlang: it\n---\nCiao.\n", "/docs/intro", "intro", "en");
        assert_eq!(page.title, "intro");
        assert_eq!(page.language, "it");
    }

    #[test]
    fn test_repeated_headings_get_unique_anchors() {
        let page = parse_page("## Usage\n\na\n\n## Usage\n\nb\n", "/x", "x", "en");
        let anchors: Vec<_> = page.sections.iter().map(|s| s.anchor.clone()).collect();
        assert_eq!(
            anchors,
            vec![Some("usage".to_string()), Some("usage-1".to_string())]
        );
    }

    #[test]
    fn test_suffixed_anchor_does_not_collide_with_literal_heading() {
        let page = parse_page(
            "## Usage\n\na\n\n## Usage\n\nb\n\n## Usage 1\n\nc\n\n## Usage\n\nd\n",
            "/x",
            "x",
            "en",
        );
        let anchors: Vec<&str> = page
            .sections
            .iter()
            .filter_map(|s| s.anchor.as_deref())
            .collect();
        assert_eq!(anchors, vec!["usage", "usage-1", "usage-1-1", "usage-2"]);
    }

    #[test]
    fn test_front_matter_yaml_scalars() {
        let title = |source: &str| parse_page(source, "/x", "x", "en").title;
        assert_eq!(title("---\ntitle: 'It''s routing'\n---\nx\n"), "It's routing");
        assert_eq!(title("---\ntitle: \"Say \\\"hi\\\"\"\n---\nx\n"), "Say \"hi\"");
        assert_eq!(title("---\ntitle: >-\n  Routing\n  guide\n---\nx\n"), "Routing guide");
        assert_eq!(title("---\ntitle: Routing # menus\n---\nx\n"), "Routing");
    }

    #[test]
    fn test_front_matter_language_key() {
        let (front, body) = split_front_matter("---\nlanguage: it\ndraft: true\n---\nCiao.\n");
        assert_eq!(front.lang.as_deref(), Some("it"));
        assert_eq!(front.title, None);
        assert_eq!(body, "Ciao.\n");
    }

    #[test]
    fn test_unterminated_front_matter_is_body() {
        let source = "---\ntitle: Draft\n\n# Real title\n";
        let (front, body) = split_front_matter(source);
        assert_eq!(front, FrontMatter::default());
        assert_eq!(body, source);
    }

    #[test]
    fn test_malformed_front_matter_keeps_body() {
        let page = parse_page("---\ntitle: [oops\n---\n# Hooks\n\nBody.\n", "/x", "x", "en");
        assert_eq!(page.title, "Hooks");
        assert_eq!(page.content, "Body.");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Getting Started!"), "getting-started");
        assert_eq!(slugify("  wp_bones CLI "), "wp_bones-cli");
    }
}
