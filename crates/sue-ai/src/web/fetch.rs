//! Page fetcher: downloads a URL and converts the HTML body to markdown.

use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};

use crate::cache::{CachedValue, WebCache};
use crate::config::AppConfig;
use crate::error::{FetchError, Result};
use crate::http_client::build_http_client;

// Elements that never carry readable page text.
const SKIPPED_TAGS: [&str; 7] = ["head", "script", "style", "noscript", "img", "svg", "iframe"];

/// Fetches pages and converts them to markdown, consulting the cache first.
pub struct PageFetcher {
    client: Client,
    user_agent: String,
}

impl PageFetcher {
    pub fn new(client: Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = build_http_client(config.request_timeout(), &config.user_agent)?;
        Ok(Self::new(client, config.user_agent.clone()))
    }

    /// Fetch `url` as markdown.
    ///
    /// A cache hit returns immediately without touching the network. Only
    /// successful, non-empty conversions are cached.
    pub async fn fetch(
        &self,
        cache: &mut WebCache,
        url: &str,
    ) -> std::result::Result<String, FetchError> {
        if let Some(CachedValue::Page(markdown)) = cache.get(url)
            && !markdown.is_empty()
        {
            tracing::info!(url, "Using cached content");
            return Ok(markdown);
        }

        validate_url(url)?;

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| log_failure(url, e.into()))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(url, status = status.as_u16(), "Unexpected status");
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| log_failure(url, e.into()))?;

        tracing::info!(url, title = %extract_title(&html), "Page title");

        let markdown = html_to_markdown(&html).map_err(|e| log_failure(url, e))?;
        if markdown.is_empty() {
            return Err(FetchError::NoContent);
        }

        cache.set(url, CachedValue::Page(markdown.clone()));
        tracing::info!(url, "Successfully processed and cached content");
        Ok(markdown)
    }
}

fn log_failure(url: &str, err: FetchError) -> FetchError {
    tracing::error!(url, error = %err, "Error processing page");
    err
}

fn validate_url(url: &str) -> std::result::Result<(), FetchError> {
    let parsed =
        url::Url::parse(url).map_err(|e| FetchError::Other(format!("Invalid URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(FetchError::Other(format!(
            "Scheme '{}' is not allowed. Only HTTP and HTTPS are permitted.",
            scheme
        ))),
    }
}

/// Text of the `<title>` element, used only for logging
fn extract_title(html: &str) -> String {
    use scraper::{Html, Selector};

    let document = Html::parse_document(html);
    Selector::parse("title")
        .ok()
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
        })
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| "No title".to_string())
}

/// Convert HTML to markdown, keeping links and emphasis and dropping images.
fn html_to_markdown(html: &str) -> std::result::Result<String, FetchError> {
    let converter = htmd::HtmlToMarkdown::builder()
        .skip_tags(SKIPPED_TAGS.to_vec())
        .build();

    converter
        .convert(html)
        .map(|markdown| markdown.trim().to_string())
        .map_err(|e| FetchError::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const UA: &str = "sue-test-agent";

    fn fetcher() -> PageFetcher {
        let client = build_http_client(Duration::from_secs(5), UA).unwrap();
        PageFetcher::new(client, UA)
    }

    fn cache() -> WebCache {
        WebCache::new(Duration::from_secs(3600), 100)
    }

    fn html_response(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/html; charset=utf-8")
            .set_body_string(body.to_string())
    }

    #[test]
    fn test_markdown_keeps_links_and_emphasis() {
        let html = r#"<html><head><title>T</title></head><body>
            <p>Read <em>this</em> and <strong>that</strong> on <a href="https://example.com">Example</a>.</p>
            <img src="cat.png" alt="cat">
        </body></html>"#;
        let markdown = html_to_markdown(html).unwrap();

        assert!(markdown.contains("[Example](https://example.com)"));
        assert!(markdown.contains("this"));
        assert!(markdown.contains("**that**"));
        assert!(!markdown.contains("cat.png"));
        assert!(markdown.starts_with("Read"));
    }

    #[test]
    fn test_markdown_skips_scripts() {
        let html = "<html><body><script>var x = 1;</script><p>Real content</p></body></html>";
        let markdown = html_to_markdown(html).unwrap();
        assert_eq!(markdown, "Real content");
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(
            extract_title("<html><head><title> Page </title></head></html>"),
            "Page"
        );
        assert_eq!(extract_title("<html><body></body></html>"), "No title");
    }

    #[test]
    fn test_validate_url_schemes() {
        assert!(validate_url("https://example.com/").is_ok());
        assert!(validate_url("http://127.0.0.1:8080/page").is_ok());
        assert!(matches!(
            validate_url("ftp://example.com/"),
            Err(FetchError::Other(_))
        ));
        assert!(matches!(validate_url("not a url"), Err(FetchError::Other(_))));
    }

    #[tokio::test]
    async fn test_fetch_converts_and_caches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/article"))
            .and(header("user-agent", UA))
            .respond_with(html_response(
                "<html><body><h1>Title</h1><p>Body text</p></body></html>",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = fetcher();
        let mut cache = cache();
        let url = format!("{}/article", server.uri());

        let first = fetcher.fetch(&mut cache, &url).await.unwrap();
        assert!(first.contains("Title"));
        assert!(first.contains("Body text"));

        // Second fetch is served from the cache; the mock expects one call.
        let second = fetcher.fetch(&mut cache, &url).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.get(&url), Some(CachedValue::Page(first)));
    }

    #[tokio::test]
    async fn test_fetch_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut cache = cache();
        let url = format!("{}/missing", server.uri());
        let err = fetcher().fetch(&mut cache, &url).await.unwrap_err();

        assert_eq!(err, FetchError::BadStatus(404));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_200_success_is_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let mut cache = cache();
        let url = format!("{}/empty", server.uri());
        let err = fetcher().fetch(&mut cache, &url).await.unwrap_err();
        assert_eq!(err, FetchError::BadStatus(204));
    }

    #[tokio::test]
    async fn test_fetch_no_content_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(html_response(
                r#"<html><head><title>Only images</title></head><body><img src="a.png"></body></html>"#,
            ))
            .expect(2)
            .mount(&server)
            .await;

        let fetcher = fetcher();
        let mut cache = cache();
        let url = format!("{}/images", server.uri());

        assert_eq!(
            fetcher.fetch(&mut cache, &url).await.unwrap_err(),
            FetchError::NoContent
        );
        assert!(!cache.contains_key(&url));

        // Nothing cached, so the next attempt goes to the network again.
        assert_eq!(
            fetcher.fetch(&mut cache, &url).await.unwrap_err(),
            FetchError::NoContent
        );
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(html_response("<p>late</p>").set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = build_http_client(Duration::from_millis(100), UA).unwrap();
        let fetcher = PageFetcher::new(client, UA);
        let mut cache = cache();
        let url = format!("{}/slow", server.uri());

        assert_eq!(
            fetcher.fetch(&mut cache, &url).await.unwrap_err(),
            FetchError::Timeout
        );
    }

    #[tokio::test]
    async fn test_fetch_connection_error_is_other() {
        let mut cache = cache();
        // Port 9 (discard) is closed on test hosts.
        let err = fetcher()
            .fetch(&mut cache, "http://127.0.0.1:9/")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Other(_)));
    }
}
