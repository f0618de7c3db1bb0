//! Provider settings and client construction

use crate::cache::LLMCache;
use crate::client::LLMClient;
use crate::generator::TestSuiteGeneratorConfig;
use crate::provider::{GeminiProvider, OllamaProvider, OpenAIProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Which backend answers generation requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAI,
    Gemini,
    Ollama,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Ollama => "ollama",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LLM backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub ollama_host: String,
    pub ollama_model: String,
    pub openai_model: String,
    pub gemini_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            gemini_api_key: None,
            ollama_host: "http://localhost:11434".to_string(),
            ollama_model: "llama3.1:8b".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            gemini_model: "gemini-pro".to_string(),
            temperature: 0.2,
            max_tokens: 4000,
            timeout_secs: 120,
        }
    }
}

fn present(key: &Option<String>) -> Option<&str> {
    key.as_deref().map(str::trim).filter(|k| !k.is_empty())
}

impl LlmSettings {
    /// OpenAI when an OpenAI key is set, else Gemini when a Gemini key is
    /// set, else the local Ollama daemon
    pub fn provider_kind(&self) -> ProviderKind {
        if present(&self.openai_api_key).is_some() {
            ProviderKind::OpenAI
        } else if present(&self.gemini_api_key).is_some() {
            ProviderKind::Gemini
        } else {
            ProviderKind::Ollama
        }
    }

    /// Model name for the selected provider
    pub fn model(&self) -> &str {
        match self.provider_kind() {
            ProviderKind::OpenAI => &self.openai_model,
            ProviderKind::Gemini => &self.gemini_model,
            ProviderKind::Ollama => &self.ollama_model,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the client for the selected provider
    pub fn build_client(&self, cache: Option<Arc<dyn LLMCache>>) -> Arc<dyn LLMClient> {
        let timeout = self.timeout();
        match self.provider_kind() {
            ProviderKind::OpenAI => {
                let key = present(&self.openai_api_key).unwrap_or_default().to_string();
                let mut provider = OpenAIProvider::new(key).with_timeout(timeout);
                if let Some(cache) = cache {
                    provider = provider.cache(cache);
                }
                Arc::new(provider)
            }
            ProviderKind::Gemini => {
                let key = present(&self.gemini_api_key).unwrap_or_default().to_string();
                let mut provider = GeminiProvider::new(key).with_timeout(timeout);
                if let Some(cache) = cache {
                    provider = provider.cache(cache);
                }
                Arc::new(provider)
            }
            ProviderKind::Ollama => Arc::new(self.ollama_provider(cache)),
        }
    }

    /// Ollama client for generation or the health probe
    pub fn ollama_provider(&self, cache: Option<Arc<dyn LLMCache>>) -> OllamaProvider {
        let provider = OllamaProvider::new(self.ollama_host.clone()).with_timeout(self.timeout());
        match cache {
            Some(cache) => provider.cache(cache),
            None => provider,
        }
    }

    /// Generator options matching these settings
    pub fn generator_config(&self) -> TestSuiteGeneratorConfig {
        TestSuiteGeneratorConfig::new(self.model())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_select_ollama() {
        let settings = LlmSettings::default();
        assert_eq!(settings.provider_kind(), ProviderKind::Ollama);
        assert_eq!(settings.model(), "llama3.1:8b");
        assert_eq!(settings.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_openai_wins_over_gemini() {
        let settings = LlmSettings {
            openai_api_key: Some("sk-test".to_string()),
            gemini_api_key: Some("g-test".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.provider_kind(), ProviderKind::OpenAI);
        assert_eq!(settings.model(), "gpt-4o-mini");
        assert_eq!(settings.build_client(None).name(), "openai");
    }

    #[test]
    fn test_gemini_without_openai_key() {
        let settings = LlmSettings {
            openai_api_key: Some("   ".to_string()),
            gemini_api_key: Some("g-test".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.provider_kind(), ProviderKind::Gemini);
        assert_eq!(settings.build_client(None).name(), "gemini");
    }

    #[test]
    fn test_partial_settings_deserialize() {
        let settings: LlmSettings =
            serde_json::from_str(r#"{"ollama_model": "mistral:7b", "temperature": 0.5}"#).unwrap();
        assert_eq!(settings.ollama_model, "mistral:7b");
        assert_eq!(settings.temperature, 0.5);
        assert_eq!(settings.max_tokens, 4000);
    }

    #[test]
    fn test_generator_config_follows_provider() {
        let config = LlmSettings::default().generator_config();
        assert_eq!(config.model, "llama3.1:8b");
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.max_tokens, Some(4000));
    }
}
