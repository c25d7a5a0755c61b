//! Web access: page fetching and search, both backed by the shared web cache.

mod fetch;
mod providers;
mod search;

pub use fetch::PageFetcher;
pub use providers::{BraveProvider, DuckDuckGoProvider, SearchHit, SearchProvider, provider_from_config};
pub use search::{WebSearcher, normalize_query};

use serde::{Deserialize, Serialize};

/// One ranked search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
}
