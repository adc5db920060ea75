use anyhow::{Context, Result};
use std::path::Path;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::*;
use tantivy::tokenizer::TokenStream;
use tantivy::{doc, DocAddress, Index, IndexReader, IndexWriter, ReloadPolicy, Term};

use super::context::SearchContext;
use super::excerpt::build_excerpt;
use crate::content::{load_pages, DocPage, DocSection};
use crate::models::{SearchResult, SearchResultItem};

const STEM_TOKENIZER: &str = "en_stem";

/// Full-text index over the documentation pages, held in memory.
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    pages: Vec<DocPage>,
    // Field handles
    f_url: Field,
    f_title: Field,
    f_content: Field,
    f_language: Field,
    f_sections: Field,
}

/// A ranked match; resolve it with [`SearchIndex::load`].
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub score: f32,
    address: DocAddress,
}

/// Full record of a matched page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub url: String,
    pub meta: PageMeta,
    pub content: String,
    pub sub_results: Vec<SubResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
}

/// A section of a matched page.
#[derive(Debug, Clone, PartialEq)]
pub struct SubResult {
    pub title: String,
    pub url: String,
    pub excerpt: String,
}

impl From<PageRecord> for SearchResult {
    fn from(record: PageRecord) -> Self {
        Self {
            title: record.meta.title,
            content: record.content,
            items: record
                .sub_results
                .into_iter()
                .map(|s| SearchResultItem {
                    title: s.title,
                    url: s.url,
                    excerpt: s.excerpt,
                })
                .collect(),
        }
    }
}

impl SearchIndex {
    /// Load the content tree and index it.
    pub fn from_content_dir(content_dir: &Path, default_language: &str) -> Result<Self> {
        let pages = load_pages(content_dir, default_language)?;
        Self::build(pages)
    }

    /// Index the given pages.
    pub fn build(pages: Vec<DocPage>) -> Result<Self> {
        let stemmed = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer(STEM_TOKENIZER)
                    .set_index_option(IndexRecordOption::WithFreqsAndPositions),
            )
            .set_stored();

        let mut schema_builder = Schema::builder();
        let f_url = schema_builder.add_text_field("url", STRING | STORED);
        let f_title = schema_builder.add_text_field("title", stemmed.clone());
        let f_content = schema_builder.add_text_field("content", stemmed);
        let f_language = schema_builder.add_text_field("language", STRING | STORED);
        let f_sections = schema_builder.add_text_field("sections", STORED);
        let schema = schema_builder.build();

        let index = Index::create_in_ram(schema);

        let mut writer: IndexWriter = index
            .writer_with_num_threads(1, 50_000_000)
            .context("Failed to create index writer")?;

        for page in &pages {
            let sections =
                serde_json::to_string(&page.sections).context("Failed to encode sections")?;
            writer.add_document(doc!(
                f_url => page.url.clone(),
                f_title => page.title.clone(),
                f_content => page.content.clone(),
                f_language => page.language.clone(),
                f_sections => sections,
            ))?;
        }

        writer.commit().context("Failed to commit index")?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .context("Failed to create reader")?;

        tracing::info!("Search index built with {} pages", pages.len());

        Ok(Self {
            index,
            reader,
            pages,
            f_url,
            f_title,
            f_content,
            f_language,
            f_sections,
        })
    }

    /// Every indexed page, sorted by URL.
    pub fn pages(&self) -> &[DocPage] {
        &self.pages
    }

    /// Run `query_str` and return at most `limit` hits, best first.
    ///
    /// All terms must match. Syntax errors in the query are ignored rather
    /// than reported. The stemmed positive terms are stored on `ctx` for
    /// [`SearchIndex::load`].
    pub fn search(
        &self,
        ctx: &mut SearchContext,
        query_str: &str,
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        ctx.terms.clear();
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut query_parser =
            QueryParser::for_index(&self.index, vec![self.f_title, self.f_content]);
        query_parser.set_conjunction_by_default();
        query_parser.set_field_boost(self.f_title, 2.0);
        let (text_query, errors) = query_parser.parse_query_lenient(query_str);
        if !errors.is_empty() {
            tracing::debug!("Ignored query syntax errors in {query_str:?}: {errors:?}");
        }
        ctx.terms = self.positive_terms(text_query.as_ref());

        let language_query: Box<dyn Query> = Box::new(TermQuery::new(
            Term::from_field_text(self.f_language, &ctx.language),
            IndexRecordOption::Basic,
        ));
        let query = BooleanQuery::new(vec![
            (Occur::Must, text_query),
            (Occur::Must, language_query),
        ]);

        let searcher = self.reader.searcher();
        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(limit))
            .context("Search failed")?;

        let mut hits: Vec<SearchHit> = top_docs
            .into_iter()
            .map(|(score, address)| SearchHit { score, address })
            .collect();
        hits.truncate(limit);
        Ok(hits)
    }

    /// Resolve a hit into the full page record with per-section excerpts.
    pub fn load(&self, ctx: &SearchContext, hit: &SearchHit) -> Result<PageRecord> {
        let searcher = self.reader.searcher();
        let doc: TantivyDocument = searcher
            .doc(hit.address)
            .context("Failed to retrieve document")?;

        let url = doc
            .get_first(self.f_url)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let title = doc
            .get_first(self.f_title)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let content = doc
            .get_first(self.f_content)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let sections: Vec<DocSection> = doc
            .get_first(self.f_sections)
            .and_then(|v| v.as_str())
            .map(serde_json::from_str::<Vec<DocSection>>)
            .transpose()
            .context("Failed to decode stored sections")?
            .unwrap_or_default();

        let mut sub_results = Vec::new();
        for section in &sections {
            let title_hit = self.marks(&section.title, &ctx.terms).iter().any(|m| *m);
            let words: Vec<&str> = section.text.split_whitespace().collect();
            let marks = self.marks_words(&words, &ctx.terms);
            if title_hit || marks.iter().any(|m| *m) {
                sub_results.push(SubResult {
                    title: section.title.clone(),
                    url: section.url(&url),
                    excerpt: build_excerpt(&words, &marks, ctx.excerpt_length),
                });
            }
        }

        if sub_results.is_empty() {
            let words: Vec<&str> = content.split_whitespace().collect();
            let marks = self.marks_words(&words, &ctx.terms);
            sub_results.push(SubResult {
                title: title.clone(),
                url: url.clone(),
                excerpt: build_excerpt(&words, &marks, ctx.excerpt_length),
            });
        }

        Ok(PageRecord {
            url,
            meta: PageMeta { title },
            content,
            sub_results,
        })
    }

    /// Text terms of `query` on the title and content fields, skipping
    /// anything under a `MustNot` clause. Sorted and deduplicated.
    fn positive_terms(&self, query: &dyn Query) -> Vec<String> {
        let mut terms = Vec::new();
        collect_positive_terms(query, &mut terms);
        let mut out: Vec<String> = terms
            .iter()
            .filter(|t| t.field() == self.f_title || t.field() == self.f_content)
            .filter_map(|t| t.value().as_str().map(str::to_string))
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Tokens of `text` as the content field indexes them.
    fn stems(&self, text: &str) -> Vec<String> {
        let Some(mut analyzer) = self.index.tokenizers().get(STEM_TOKENIZER) else {
            return text
                .split_whitespace()
                .map(|w| w.to_lowercase())
                .collect();
        };
        let mut stream = analyzer.token_stream(text);
        let mut out = Vec::new();
        while stream.advance() {
            out.push(stream.token().text.clone());
        }
        out
    }

    fn marks(&self, text: &str, terms: &[String]) -> Vec<bool> {
        let words: Vec<&str> = text.split_whitespace().collect();
        self.marks_words(&words, terms)
    }

    fn marks_words(&self, words: &[&str], terms: &[String]) -> Vec<bool> {
        words
            .iter()
            .map(|word| self.stems(word).iter().any(|s| terms.contains(s)))
            .collect()
    }
}

fn collect_positive_terms(query: &dyn Query, out: &mut Vec<Term>) {
    match query.downcast_ref::<BooleanQuery>() {
        Some(boolean) => {
            for (occur, clause) in boolean.clauses() {
                if *occur != Occur::MustNot {
                    collect_positive_terms(clause.as_ref(), out);
                }
            }
        }
        None => query.query_terms(&mut |term, _| out.push(term.clone())),
    }
}
