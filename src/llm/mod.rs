pub mod noop;
pub mod openai;
pub mod prompt_builder;
mod prompts;

use crate::error::CompletionError;

pub use noop::NoopClient;
pub use openai::{ChatOptions, OpenAiClient};

/// Trait for talking to a chat-completion backend (real or dummy).
pub trait ChatCompletion {
    /// Send a system + user prompt pair and return the generated text.
    fn chat_completion(&self, system: &str, user: &str) -> Result<String, CompletionError>;
}
