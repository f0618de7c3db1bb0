//! REST API type definitions
//!
//! Request and response types for the REST API endpoints.

use crate::config::ServerConfig;
use crate::rate_limit::RateLimiter;
use prdcase_core::{OutputFormat, TestCase};
use prdcase_llm::{
    InMemoryLLMCache, LLMCache, LLMClient, OllamaHealth, OllamaProvider, ProviderKind,
    TestSuiteGenerator,
};
use prdcase_parser::Strategy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<TestSuiteGenerator>,
    pub rate_limiter: Arc<RateLimiter>,
    pub access_password: Option<String>,
    pub max_document_bytes: usize,
    /// Probe reported by `/api/health` when generation runs on Ollama
    pub ollama: Option<(Arc<OllamaProvider>, String)>,
}

impl AppState {
    /// State around an existing client (used by tests and embedders)
    pub fn new(config: &ServerConfig, client: Arc<dyn LLMClient>) -> Self {
        let generator = TestSuiteGenerator::new(client, config.llm.generator_config());
        Self {
            generator: Arc::new(generator),
            rate_limiter: Arc::new(RateLimiter::from_config(&config.rate_limit)),
            access_password: config
                .access_password
                .clone()
                .filter(|p| !p.is_empty()),
            max_document_bytes: config.max_document_bytes,
            ollama: None,
        }
    }

    /// State with the provider selected by the configuration
    pub fn from_config(config: &ServerConfig) -> Self {
        let cache: Option<Arc<dyn LLMCache>> = if config.enable_cache {
            Some(Arc::new(InMemoryLLMCache::new()))
        } else {
            None
        };

        let state = Self::new(config, config.llm.build_client(cache));
        match config.llm.provider_kind() {
            ProviderKind::Ollama => state.with_ollama_probe(
                config.llm.ollama_provider(None),
                config.llm.ollama_model.clone(),
            ),
            ProviderKind::OpenAI | ProviderKind::Gemini => state,
        }
    }

    /// Report Ollama availability for `model` on the health endpoint
    pub fn with_ollama_probe(mut self, provider: OllamaProvider, model: String) -> Self {
        self.ollama = Some((Arc::new(provider), model));
        self
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub ai_provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ollama: Option<OllamaHealth>,
}

/// Generation request payload
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Inline document text
    #[serde(default)]
    pub content: Option<String>,

    /// Document as a base64 `data:` URL
    #[serde(default)]
    pub file: Option<String>,

    #[serde(default)]
    pub file_name: Option<String>,

    /// `table` (default) or `gherkin`
    #[serde(default)]
    pub format: Option<String>,

    /// Comma-separated categories, e.g. `functional,edge-case,negative`
    #[serde(default)]
    pub scenario_types: Option<String>,
}

/// Generation response payload
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,

    /// The model's reply, verbatim
    pub test_cases: String,

    /// Normalized test cases
    pub cases: Vec<TestCase>,

    pub parsed: bool,
    pub strategy: Strategy,
    pub format: OutputFormat,

    /// Set when the reply could not be parsed and should be shown raw
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,

    pub metadata: GenerationMetadata,
}

/// Details about the document and the backend that answered
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub file_name: String,
    pub file_size: usize,
    pub extracted_length: usize,
    pub ai_provider: String,
    pub model: String,
    pub tokens_used: u32,
    pub truncated: bool,
}
