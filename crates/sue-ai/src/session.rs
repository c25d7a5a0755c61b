//! Assistant session: command entry points over fetch, search, context and the model.
//!
//! Every public operation returns user-facing text. Failures below this layer
//! are logged and rendered as localized messages; none escape as errors.

use std::sync::Arc;

use crate::cache::WebCache;
use crate::config::AppConfig;
use crate::context::{ContextStore, PromptKind};
use crate::error::{AiError, FetchError, Result};
use crate::history::ConversationHistory;
use crate::llm::{CompletionRequest, LlmClient, Message, MistralClient};
use crate::prompt;
use crate::web::{PageFetcher, SearchResult, WebSearcher, provider_from_config};

pub const NO_SEARCH_RESULTS: &str = "Извините, не удалось найти информацию по вашему запросу.";

/// Outcome of loading one page with `/c_web`
#[derive(Debug, Clone, PartialEq)]
pub struct PageLoad {
    pub url: String,
    pub response: String,
}

/// One conversation with its own cache, context pages and history.
pub struct Session {
    llm: Arc<dyn LlmClient>,
    fetcher: PageFetcher,
    searcher: WebSearcher,
    cache: WebCache,
    context: ContextStore,
    history: ConversationHistory,
    system_prompt: String,
    temperature: f32,
    max_tokens: u32,
    search_results: usize,
}

impl Session {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        fetcher: PageFetcher,
        searcher: WebSearcher,
        config: &AppConfig,
    ) -> Self {
        Self {
            llm,
            fetcher,
            searcher,
            cache: WebCache::new(config.cache_ttl(), config.cache_max_entries),
            context: ContextStore::new(),
            history: ConversationHistory::new(),
            system_prompt: prompt::SYSTEM_PROMPT.to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            search_results: config.search_results,
        }
    }

    /// Build a session talking to Mistral with the configured search provider.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let issues = config.validate();
        if !issues.is_empty() {
            return Err(AiError::Config(issues.join("; ")));
        }

        let llm = Arc::new(MistralClient::from_config(config)?);
        let fetcher = PageFetcher::from_config(config)?;
        let searcher = WebSearcher::new(provider_from_config(config)?, &config.search_language);
        tracing::info!(
            model = %config.model,
            search_provider = searcher.provider_name(),
            "Session ready"
        );
        Ok(Self::new(llm, fetcher, searcher, config))
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn context(&self) -> &ContextStore {
        &self.context
    }

    pub fn cache(&self) -> &WebCache {
        &self.cache
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// Plain chat turn, ignoring any loaded pages.
    pub async fn chat(&mut self, user_input: &str) -> String {
        let prompt = prompt::plain_prompt(user_input);
        match self.ask_model(user_input, prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Chat error");
                format!("Произошла ошибка: {e}")
            }
        }
    }

    /// Free-text turn, grounded in loaded pages unless it is small talk.
    pub async fn chat_with_context(&mut self, user_input: &str) -> String {
        let composed = self.context.compose_prompt(user_input);
        if composed.kind == PromptKind::Context {
            tracing::debug!(pages = self.context.len(), "Answering from context");
        }

        match self.ask_model(user_input, composed.text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Chat error");
                format!("Произошла ошибка: {e}")
            }
        }
    }

    /// `/md_web URL`: fetch a page as markdown and add it to the context.
    pub async fn load_markdown(&mut self, url: &str) -> String {
        match self.fetcher.fetch(&mut self.cache, url).await {
            Ok(markdown) => {
                self.context.add_page(url, markdown);
                format!("Контент страницы {url} добавлен в контекст в формате markdown.")
            }
            Err(e) => e.to_string(),
        }
    }

    /// `/web URL QUERY`: answer `query` from a single page.
    pub async fn analyze_page(&mut self, url: &str, query: &str, store_context: bool) -> String {
        let markdown = match self.fetcher.fetch(&mut self.cache, url).await {
            Ok(markdown) => markdown,
            Err(e) => return e.to_string(),
        };

        let prompt = prompt::page_prompt(query, &markdown);
        if store_context {
            self.context.add_page(url, markdown);
        }

        match self.ask_model(query, prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(url, error = %e, "Error processing webpage");
                format!("Ошибка при обработке страницы: {e}")
            }
        }
    }

    /// `/c_web URL1,URL2,...`: load pages one after another, in order.
    pub async fn load_pages<S: AsRef<str>>(&mut self, urls: &[S]) -> Vec<PageLoad> {
        let mut loads = Vec::new();
        for url in urls.iter().map(|u| u.as_ref().trim()).filter(|u| !u.is_empty()) {
            let response = self
                .analyze_page(url, prompt::LOAD_PAGE_PROMPT, true)
                .await;
            loads.push(PageLoad {
                url: url.to_string(),
                response,
            });
        }
        loads
    }

    /// `/s_web QUERY`: search the web and answer from the results.
    pub async fn search_and_respond(&mut self, query: &str) -> String {
        let results = self.search(query, self.search_results).await;
        if results.is_empty() {
            return NO_SEARCH_RESULTS.to_string();
        }

        let prompt = prompt::search_prompt(query, &results);
        match self.ask_model(query, prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(query, error = %e, "Search error");
                format!("Произошла ошибка при поиске: {e}")
            }
        }
    }

    /// Fetch a page without touching context or history.
    pub async fn fetch_markdown(&mut self, url: &str) -> std::result::Result<String, FetchError> {
        self.fetcher.fetch(&mut self.cache, url).await
    }

    /// Search without involving the model.
    pub async fn search(&mut self, query: &str, num_results: usize) -> Vec<SearchResult> {
        self.searcher
            .search(&mut self.cache, query, num_results)
            .await
    }

    /// Send `prompt` with the full history; on success record `raw_input`
    /// and the reply as one exchange. An empty reply still counts as success.
    async fn ask_model(&mut self, raw_input: &str, prompt: String) -> Result<String> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(Message::system(self.system_prompt.clone()));
        messages.extend(self.history.messages().iter().cloned());
        messages.push(Message::user(prompt));

        let request = CompletionRequest::new(messages)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        let response = self.llm.complete(request).await?;
        let reply = response.content.unwrap_or_default();
        if reply.trim().is_empty() {
            tracing::warn!(finish_reason = ?response.finish_reason, "Model returned empty content");
        }

        self.history.push_exchange(raw_input, reply.clone());
        Ok(reply)
    }
}
