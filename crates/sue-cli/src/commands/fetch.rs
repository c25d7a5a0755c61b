use anyhow::{Result, bail};
use serde_json::json;
use sue_ai::{AppConfig, PageFetcher, WebCache};

use crate::output::{OutputFormat, print_json};

/// Print a page as markdown. Needs no model and no API key.
pub async fn run(config: &AppConfig, url: &str, format: OutputFormat) -> Result<()> {
    let fetcher = PageFetcher::from_config(config)?;
    let mut cache = WebCache::new(config.cache_ttl(), config.cache_max_entries);

    let markdown = match fetcher.fetch(&mut cache, url).await {
        Ok(markdown) => markdown,
        Err(e) => bail!("{e}"),
    };

    if format.is_json() {
        return print_json(&json!({ "url": url, "markdown": markdown }));
    }

    println!("{markdown}");
    Ok(())
}
