//! Documentation search: an in-memory tantivy index over the content tree,
//! queried with a per-request [`SearchContext`].

pub mod context;
pub mod excerpt;
pub mod index;

pub use context::SearchContext;
pub use index::{PageRecord, SearchHit, SearchIndex};
