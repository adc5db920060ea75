/// Everything a single query needs besides the index itself.
///
/// Built by the handler for one request and dropped with it, so concurrent
/// searches never share mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchContext {
    /// Only pages in this language are returned.
    pub language: String,
    /// Excerpt length in words.
    pub excerpt_length: usize,
    /// Stemmed positive terms of the last query, set by [`SearchIndex::search`]
    /// and used to highlight and pick sections.
    ///
    /// [`SearchIndex::search`]: super::SearchIndex::search
    pub terms: Vec<String>,
}

impl SearchContext {
    pub fn new(language: impl Into<String>, excerpt_length: usize) -> Self {
        Self {
            language: language.into(),
            excerpt_length: excerpt_length.max(1),
            terms: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_has_no_terms() {
        let ctx = SearchContext::new("en", 0);
        assert_eq!(ctx.excerpt_length, 1);
        assert!(ctx.terms.is_empty());
    }
}
