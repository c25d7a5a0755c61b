use anyhow::Result;
use colored::Colorize;
use sue_ai::{AppConfig, WebCache, WebSearcher, normalize_query, provider_from_config};

use crate::output::{OutputFormat, print_json};

/// Print search results without asking the model.
pub async fn run(
    config: &AppConfig,
    query: &[String],
    num_results: usize,
    format: OutputFormat,
) -> Result<()> {
    let query = query.join(" ");
    let searcher = WebSearcher::new(provider_from_config(config)?, &config.search_language);
    let mut cache = WebCache::new(config.cache_ttl(), config.cache_max_entries);

    let results = searcher.search(&mut cache, &query, num_results).await;

    if format.is_json() {
        return print_json(&results);
    }

    if results.is_empty() {
        println!("Ничего не найдено по запросу: {}", normalize_query(&query));
        return Ok(());
    }

    for (index, result) in results.iter().enumerate() {
        println!("{}. {}", index + 1, result.title.bold());
        println!("   {}", result.link.blue());
        println!("   {}", result.snippet);
    }
    Ok(())
}
