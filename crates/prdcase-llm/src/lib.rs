//! PRDCASE LLM Integration
//!
//! This crate turns a product requirement document into a test suite:
//! - Prompt construction: a system/user prompt pair requesting a six-column
//!   markdown table or Gherkin scenarios
//! - Provider clients: OpenAI, Gemini, Ollama (plus a mock for tests)
//! - Orchestration: prompt -> one LLM call -> response normalization
//!
//! **Note**: document analysis is slow. Provider calls use a two-minute
//! request timeout by default and are never retried.

// Re-export core types
pub use cache::{InMemoryLLMCache, LLMCache};
pub use client::{LLMClient, LLMRequest, LLMResponse};
pub use config::{LlmSettings, ProviderKind};
pub use error::{LLMError, Result};

// Re-export providers
pub use provider::{
    GeminiProvider, LLMProvider, MockProvider, OllamaHealth, OllamaProvider, OpenAIProvider,
};

// Re-export generators
pub use generator::{
    parse_categories, GenerationOutcome, PromptBuilder, PromptPair, TestSuiteGenerator,
    TestSuiteGeneratorConfig,
};

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod provider;
