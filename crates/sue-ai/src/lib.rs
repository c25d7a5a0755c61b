//! Sue AI - conversational assistant core
//!
//! This crate provides:
//! - A size-bounded TTL cache shared by page fetching and web search
//! - Page fetching with HTML to markdown conversion
//! - Web search with query cleanup and one relaxed retry
//! - A context store that grounds answers in previously fetched pages
//! - A chat session over a Mistral-compatible LLM client

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod history;
mod http_client;
pub mod llm;
pub mod prompt;
pub mod session;
pub mod web;

// Re-export commonly used types
pub use cache::{CachedValue, TtlCache, WebCache};
pub use config::AppConfig;
pub use context::{ComposedPrompt, ContextPage, ContextStore, PromptKind};
pub use error::{AiError, FetchError, Result};
pub use history::ConversationHistory;
pub use llm::{LlmClient, Message, MistralClient, MockLlmClient, MockStep, Role};
pub use session::{PageLoad, Session};
pub use web::{
    BraveProvider, DuckDuckGoProvider, PageFetcher, SearchHit, SearchProvider, SearchResult,
    WebSearcher, normalize_query, provider_from_config,
};
