//! Context store: web pages retained to ground later answers.

use chrono::{DateTime, Utc};

use crate::prompt;

/// Phrases that mark small talk; context is bypassed for these.
const SMALL_TALK_PHRASES: [&str; 10] = [
    "как дела",
    "привет",
    "здравствуй",
    "пока",
    "до свидания",
    "спасибо",
    "благодарю",
    "доброе утро",
    "добрый день",
    "добрый вечер",
];

/// Page content kept for the rest of the session
#[derive(Debug, Clone, PartialEq)]
pub struct ContextPage {
    pub url: String,
    pub content: String,
    pub fetched_at: DateTime<Utc>,
}

/// Which template produced a composed prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Plain,
    Context,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    pub kind: PromptKind,
    pub text: String,
}

/// Insertion-ordered pages keyed by URL, plus the current-context pointer.
///
/// Re-adding a URL replaces its content in place and keeps its position.
/// Pages are never removed.
#[derive(Debug, Clone, Default)]
pub struct ContextStore {
    pages: Vec<ContextPage>,
    current_context: Option<String>,
    last_url: Option<String>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the page for `url` and make it the current context.
    pub fn add_page(&mut self, url: impl Into<String>, content: impl Into<String>) {
        let url = url.into();
        let page = ContextPage {
            url: url.clone(),
            content: content.into(),
            fetched_at: Utc::now(),
        };

        match self.pages.iter_mut().find(|p| p.url == url) {
            Some(existing) => *existing = page,
            None => self.pages.push(page),
        }

        tracing::info!(url = %url, "Added page to context");
        self.current_context = Some(url.clone());
        self.last_url = Some(url);
    }

    pub fn current_context(&self) -> Option<&str> {
        self.current_context.as_deref()
    }

    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    pub fn get(&self, url: &str) -> Option<&ContextPage> {
        self.pages.iter().find(|p| p.url == url)
    }

    /// Pages in the order they were first added
    pub fn pages(&self) -> &[ContextPage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Build the prompt for a free-text turn.
    ///
    /// Falls back to a plain chat prompt when nothing is loaded or the input
    /// is small talk; otherwise every page is injected.
    pub fn compose_prompt(&self, user_input: &str) -> ComposedPrompt {
        if self.pages.is_empty() || self.current_context.is_none() || is_small_talk(user_input) {
            return ComposedPrompt {
                kind: PromptKind::Plain,
                text: prompt::plain_prompt(user_input),
            };
        }

        let full_context = prompt::format_context(&self.pages);
        ComposedPrompt {
            kind: PromptKind::Context,
            text: prompt::context_prompt(user_input, &full_context),
        }
    }
}

pub fn is_small_talk(input: &str) -> bool {
    let lowered = input.to_lowercase();
    SMALL_TALK_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}
