//! Search providers
//!
//! - Brave Search API (needs BRAVE_API_KEY)
//! - DuckDuckGo HTML (free, no API key, best-effort)

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::{AiError, Result};
use crate::http_client::{build_http_client, truncate_error_body};

const DUCKDUCKGO_URL: &str = "https://html.duckduckgo.com/html/";
const BRAVE_URL: &str = "https://api.search.brave.com/res/v1/web/search";

/// Raw hit as returned by a provider, before defaults are applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHit {
    pub title: Option<String>,
    pub url: String,
    pub description: Option<String>,
}

/// Search backend used by [`crate::web::WebSearcher`]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Run one search. `language` is a two-letter hint such as `ru`.
    async fn search(
        &self,
        query: &str,
        language: &str,
        num_results: usize,
    ) -> Result<Vec<SearchHit>>;
}

/// Pick Brave when an API key is configured, DuckDuckGo otherwise.
pub fn provider_from_config(config: &AppConfig) -> Result<Arc<dyn SearchProvider>> {
    let client = build_http_client(config.request_timeout(), &config.user_agent)?;
    match config.brave_api_key.as_deref().filter(|key| !key.is_empty()) {
        Some(key) => Ok(Arc::new(BraveProvider::new(client, key))),
        None => Ok(Arc::new(DuckDuckGoProvider::new(client))),
    }
}

/// DuckDuckGo HTML endpoint scraper
pub struct DuckDuckGoProvider {
    client: Client,
    base_url: String,
}

impl DuckDuckGoProvider {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DUCKDUCKGO_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// DuckDuckGo region code for a language hint
fn duckduckgo_region(language: &str) -> String {
    match language {
        "en" => "us-en".to_string(),
        "" => "wt-wt".to_string(),
        lang => format!("{lang}-{lang}"),
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(
        &self,
        query: &str,
        language: &str,
        num_results: usize,
    ) -> Result<Vec<SearchHit>> {
        let url = format!(
            "{}?q={}&kl={}",
            self.base_url,
            urlencoding::encode(query),
            duckduckgo_region(language)
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AiError::Search(format!(
                "DuckDuckGo returned status {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        parse_duckduckgo_html(&html, num_results)
    }
}

/// Parse DuckDuckGo HTML lite results page
fn parse_duckduckgo_html(html: &str, max_results: usize) -> Result<Vec<SearchHit>> {
    use scraper::{Html, Selector};

    let selector = |css: &str| {
        Selector::parse(css).map_err(|e| AiError::Search(format!("bad selector {css}: {e:?}")))
    };
    let result_sel = selector(".result")?;
    let link_sel = selector(".result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let document = Html::parse_document(html);
    let mut hits = Vec::new();

    for element in document.select(&result_sel).take(max_results) {
        let Some(link) = element.select(&link_sel).next() else {
            continue;
        };

        let title = link.text().collect::<String>().trim().to_string();
        let url = normalize_duckduckgo_url(link.value().attr("href").unwrap_or(""));
        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string());

        if !url.is_empty() {
            hits.push(SearchHit {
                title: Some(title).filter(|t| !t.is_empty()),
                url,
                description: snippet.filter(|s| !s.is_empty()),
            });
        }
    }

    Ok(hits)
}

/// Normalize DuckDuckGo tracking links to the destination URL.
///
/// DDG HTML results often return links like:
/// https://duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com
fn normalize_duckduckgo_url(raw_url: &str) -> String {
    // Protocol-relative redirect links are common on the HTML endpoint.
    let absolute = if raw_url.starts_with("//") {
        format!("https:{raw_url}")
    } else {
        raw_url.to_string()
    };

    let Ok(parsed) = url::Url::parse(&absolute) else {
        return raw_url.to_string();
    };

    if parsed.domain() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
        for (key, value) in parsed.query_pairs() {
            if key == "uddg" {
                return value.into_owned();
            }
        }
    }

    absolute
}

/// Brave Search JSON API
pub struct BraveProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl BraveProvider {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: BRAVE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Debug, Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    #[serde(default)]
    title: Option<String>,
    url: String,
    #[serde(default)]
    description: Option<String>,
}

#[async_trait]
impl SearchProvider for BraveProvider {
    fn name(&self) -> &str {
        "brave"
    }

    async fn search(
        &self,
        query: &str,
        language: &str,
        num_results: usize,
    ) -> Result<Vec<SearchHit>> {
        let url = format!(
            "{}?q={}&count={}&search_lang={}",
            self.base_url,
            urlencoding::encode(query),
            num_results,
            language
        );
        let response = self
            .client
            .get(&url)
            .header("X-Subscription-Token", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = truncate_error_body(response.text().await.unwrap_or_default());
            return Err(AiError::Search(format!(
                "Brave Search API error ({}): {}",
                status, body
            )));
        }

        let data: BraveResponse = response.json().await?;
        Ok(data
            .web
            .map(|web| web.results)
            .unwrap_or_default()
            .into_iter()
            .take(num_results)
            .map(|r| SearchHit {
                title: r.title,
                url: r.url,
                description: r.description,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> Client {
        build_http_client(Duration::from_secs(5), "sue-test").unwrap()
    }

    #[test]
    fn test_parse_duckduckgo_html_empty() {
        let html = "<html><body></body></html>";
        assert!(parse_duckduckgo_html(html, 5).unwrap().is_empty());
    }

    #[test]
    fn test_parse_duckduckgo_html_with_results() {
        let html = r#"
        <html><body>
            <div class="result">
                <a class="result__a" href="https://example.com">Example Title</a>
                <a class="result__snippet">This is a snippet about example.</a>
            </div>
            <div class="result">
                <a class="result__a" href="https://test.com">Test Title</a>
            </div>
        </body></html>
        "#;
        let hits = parse_duckduckgo_html(html, 5).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title.as_deref(), Some("Example Title"));
        assert_eq!(hits[0].url, "https://example.com");
        assert_eq!(
            hits[0].description.as_deref(),
            Some("This is a snippet about example.")
        );
        assert_eq!(hits[1].description, None);
    }

    #[test]
    fn test_parse_duckduckgo_html_respects_limit() {
        let html = r#"
        <html><body>
            <div class="result"><a class="result__a" href="https://a.com">A</a></div>
            <div class="result"><a class="result__a" href="https://b.com">B</a></div>
            <div class="result"><a class="result__a" href="https://c.com">C</a></div>
        </body></html>
        "#;
        assert_eq!(parse_duckduckgo_html(html, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_normalize_duckduckgo_redirects() {
        assert_eq!(
            normalize_duckduckgo_url("https://duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fpost"),
            "https://example.com/post"
        );
        assert_eq!(
            normalize_duckduckgo_url("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.org"),
            "https://example.org"
        );
        assert_eq!(
            normalize_duckduckgo_url("https://example.com/a"),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_duckduckgo_region() {
        assert_eq!(duckduckgo_region("ru"), "ru-ru");
        assert_eq!(duckduckgo_region("en"), "us-en");
    }

    #[tokio::test]
    async fn test_duckduckgo_sends_region_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "нейросеть"))
            .and(query_param("kl", "ru-ru"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div class="result"><a class="result__a" href="https://ru.wikipedia.org/nn">Нейросеть</a></div>"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let provider = DuckDuckGoProvider::new(client()).with_base_url(server.uri());
        let hits = provider.search("нейросеть", "ru", 3).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "https://ru.wikipedia.org/nn");
    }

    #[tokio::test]
    async fn test_duckduckgo_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = DuckDuckGoProvider::new(client()).with_base_url(server.uri());
        assert!(matches!(
            provider.search("q", "ru", 3).await,
            Err(AiError::Search(_))
        ));
    }

    #[tokio::test]
    async fn test_brave_search_parses_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("X-Subscription-Token", "brave-key"))
            .and(query_param("search_lang", "ru"))
            .and(query_param("count", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "web": {"results": [
                    {"title": "One", "url": "https://one.example", "description": "first"},
                    {"url": "https://two.example"},
                    {"title": "Three", "url": "https://three.example"}
                ]}
            })))
            .mount(&server)
            .await;

        let provider = BraveProvider::new(client(), "brave-key").with_base_url(server.uri());
        let hits = provider.search("rust", "ru", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title.as_deref(), Some("One"));
        assert_eq!(hits[1].title, None);
    }

    #[tokio::test]
    async fn test_brave_error_body_is_truncated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("x".repeat(4096)))
            .mount(&server)
            .await;

        let provider = BraveProvider::new(client(), "bad-key").with_base_url(server.uri());
        match provider.search("rust", "ru", 3).await {
            Err(AiError::Search(message)) => {
                assert!(message.starts_with("Brave Search API error (401"));
                assert!(message.ends_with("... [truncated]"));
                assert!(message.len() < 1024);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_provider_from_config() {
        let config = AppConfig::default();
        assert_eq!(provider_from_config(&config).unwrap().name(), "duckduckgo");

        let config = AppConfig {
            brave_api_key: Some("key".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(provider_from_config(&config).unwrap().name(), "brave");
    }
}
