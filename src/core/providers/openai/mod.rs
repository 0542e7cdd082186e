//! OpenAI Provider
//!
//! Translation and instruction answering through the chat completions API
//! (gpt-3.5-turbo and gpt-4).

pub mod client;
pub mod prompts;
pub mod provider;

pub use client::{ChatClient, ChatMessage, Role};
pub use prompts::PromptStyle;
pub use provider::{ChatResponder, ChatTranslator};
