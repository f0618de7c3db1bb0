//! LLM provider implementations

use crate::client::LLMClient;
use std::time::Duration;

/// Default request timeout; analyzing a long document is slow
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// LLM provider trait
pub trait LLMProvider: LLMClient {
    /// Get the provider name
    fn provider_name(&self) -> &str;
}

// Re-export all providers
mod gemini;
mod mock;
mod ollama;
mod openai;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use ollama::{OllamaHealth, OllamaProvider};
pub use openai::OpenAIProvider;
