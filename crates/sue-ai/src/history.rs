//! Conversation history
//!
//! Append-only record of completed exchanges. Only the raw user input and the
//! model reply are stored, never the decorated prompt, so the per-turn
//! grounding material does not pile up in later requests. There is no
//! trimming: a long session grows without bound.

use crate::llm::Message;

#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed exchange: the user turn, then the assistant turn.
    pub fn push_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.messages.push(Message::user(user));
        self.messages.push(Message::assistant(assistant));
    }

    /// Messages in chronological order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
