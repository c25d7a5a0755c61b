mod ttl_cache;

pub use ttl_cache::TtlCache;

use crate::web::SearchResult;

/// Value stored in the shared web cache
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    /// Page converted to markdown, keyed by URL
    Page(String),
    /// Search results, keyed by normalized query and result count
    Search(Vec<SearchResult>),
}

/// Single cache shared by the page fetcher and the web searcher
pub type WebCache = TtlCache<CachedValue>;
