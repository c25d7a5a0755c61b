//! LLM module - chat completion client abstraction

mod client;
mod mistral;
mod mock_client;

pub use client::{
    CompletionRequest, CompletionResponse, FinishReason, LlmClient, Message, Role, TokenUsage,
};
pub use mistral::MistralClient;
pub use mock_client::{MockLlmClient, MockStep};
