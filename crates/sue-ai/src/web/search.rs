//! Web searcher: query cleanup, one relaxed retry, cached results.

use std::sync::Arc;

use super::SearchResult;
use super::providers::{SearchHit, SearchProvider};
use crate::cache::{CachedValue, WebCache};

const QUOTE_CHARS: [char; 5] = ['"', '“', '”', '«', '»'];
const SEARCH_PREFIXES: [&str; 4] = ["найди", "поищи", "расскажи", "что такое"];
const RETRY_KEYWORDS: usize = 3;
const MISSING_SNIPPET: &str = "Описание недоступно";

/// Clean a free-text query before it is sent to a provider.
///
/// Removes quote characters and trailing question marks, then strips one
/// leading search-intent phrase such as `что такое`.
pub fn normalize_query(query: &str) -> String {
    let unquoted: String = query.chars().filter(|c| !QUOTE_CHARS.contains(c)).collect();
    let trimmed = unquoted.trim().trim_end_matches('?');

    let stripped = SEARCH_PREFIXES
        .iter()
        .find_map(|prefix| strip_prefix_ignore_case(trimmed, prefix))
        .unwrap_or(trimmed);

    stripped.trim().to_string()
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut chars = text.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    let rest = chars.next().map(|(idx, _)| idx).unwrap_or(text.len());
    Some(text[rest..].trim_start())
}

fn cache_key(clean_query: &str, num_results: usize) -> String {
    format!("search_{clean_query}_{num_results}")
}

fn relaxed_query(clean_query: &str) -> String {
    clean_query
        .split_whitespace()
        .take(RETRY_KEYWORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

fn into_results(hits: Vec<SearchHit>, num_results: usize) -> Vec<SearchResult> {
    hits.into_iter()
        .take(num_results)
        .map(|hit| SearchResult {
            title: hit
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| hit.url.clone()),
            snippet: hit
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| MISSING_SNIPPET.to_string()),
            link: hit.url,
        })
        .collect()
}

/// Searches the web through a [`SearchProvider`], caching non-empty results.
pub struct WebSearcher {
    provider: Arc<dyn SearchProvider>,
    language: String,
}

impl WebSearcher {
    pub fn new(provider: Arc<dyn SearchProvider>, language: impl Into<String>) -> Self {
        Self {
            provider,
            language: language.into(),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Search for `query`, returning at most `num_results` results.
    ///
    /// Never fails: a provider error triggers one retry with the first three
    /// words of the cleaned query, and a second failure yields an empty list.
    /// An empty list therefore means either "no results" or "provider down".
    pub async fn search(
        &self,
        cache: &mut WebCache,
        query: &str,
        num_results: usize,
    ) -> Vec<SearchResult> {
        let clean_query = normalize_query(query);
        tracing::info!(query = %clean_query, "Cleaned query");

        let key = cache_key(&clean_query, num_results);
        if let Some(CachedValue::Search(results)) = cache.get(&key)
            && !results.is_empty()
        {
            tracing::info!(query = %clean_query, "Using cached search results");
            return results;
        }

        let results = match self
            .provider
            .search(&clean_query, &self.language, num_results)
            .await
        {
            Ok(hits) => into_results(hits, num_results),
            Err(e) => {
                tracing::warn!(error = %e, provider = self.provider.name(), "Initial search error");
                let keywords = relaxed_query(&clean_query);
                tracing::info!(keywords = %keywords, "Retrying with keywords");

                match self
                    .provider
                    .search(&keywords, &self.language, num_results)
                    .await
                {
                    Ok(hits) => into_results(hits, num_results),
                    Err(e) => {
                        tracing::warn!(error = %e, provider = self.provider.name(), "Retry search error");
                        Vec::new()
                    }
                }
            }
        };

        if results.is_empty() {
            tracing::warn!(query = %clean_query, "No results found");
            return results;
        }

        cache.set(key, CachedValue::Search(results.clone()));
        tracing::info!(query = %clean_query, results = results.len(), "Found results");
        results
    }
}
