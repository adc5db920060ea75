/// Build an excerpt of at most `length` words, centred on the first matched
/// word, with every matched word wrapped in `<mark>`.
///
/// Falls back to the leading words when nothing matched.
pub fn build_excerpt(words: &[&str], matched: &[bool], length: usize) -> String {
    if words.is_empty() || length == 0 {
        return String::new();
    }

    let length = length.min(words.len());
    let start = match matched.iter().position(|m| *m) {
        Some(first) => first
            .saturating_sub(length / 2)
            .min(words.len() - length),
        None => 0,
    };

    words[start..start + length]
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let word = escape_html(word);
            if matched.get(start + i).copied().unwrap_or(false) {
                format!("<mark>{word}</mark>")
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn test_excerpt_centres_on_match() {
        let w = words("one two three four five six seven eight nine ten");
        let mut matched = vec![false; w.len()];
        matched[6] = true;
        let excerpt = build_excerpt(&w, &matched, 4);
        assert_eq!(excerpt, "five six <mark>seven</mark> eight");
    }

    #[test]
    fn test_excerpt_clamped_at_end() {
        let w = words("a b c d e");
        let mut matched = vec![false; w.len()];
        matched[4] = true;
        assert_eq!(build_excerpt(&w, &matched, 3), "c d <mark>e</mark>");
    }

    #[test]
    fn test_excerpt_without_match_uses_leading_words() {
        let w = words("a b c d e");
        assert_eq!(build_excerpt(&w, &[false; 5], 2), "a b");
        assert_eq!(build_excerpt(&w, &[false; 5], 50), "a b c d e");
    }

    #[test]
    fn test_excerpt_escapes_html() {
        let w = words("use <Callout> & more");
        let excerpt = build_excerpt(&w, &[false, true, false, false], 10);
        assert_eq!(excerpt, "use <mark>&lt;Callout&gt;</mark> &amp; more");
    }
}
