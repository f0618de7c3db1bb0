//! Server configuration

use prdcase_llm::LlmSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-client request budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests allowed per window; 0 disables limiting
    pub max_requests: u32,

    /// Window length in seconds
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_secs: 3600,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Log level
    pub log_level: String,

    /// When set, generation requests must send it in `x-access-password`
    pub access_password: Option<String>,

    /// Rate limit for generation requests
    pub rate_limit: RateLimitConfig,

    /// Largest accepted document, in bytes after decoding
    pub max_document_bytes: usize,

    /// Reuse replies for identical prompts
    pub enable_cache: bool,

    /// LLM backend
    pub llm: LlmSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            log_level: "info".to_string(),
            access_password: None,
            rate_limit: RateLimitConfig::default(),
            max_document_bytes: 10 * 1024 * 1024,
            enable_cache: true,
            llm: LlmSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let mut config = Self::load_from("config/server")?;
        config.apply_provider_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from `path` (any extension the `config` crate understands, the
    /// file being optional) layered under `PRDCASE_*` environment variables.
    /// Nested keys use `__`, e.g. `PRDCASE_LLM__OLLAMA_MODEL`.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let name = path.as_ref().to_string_lossy().into_owned();
        let config_result = config::Config::builder()
            .add_source(config::File::with_name(&name).required(false))
            .add_source(
                config::Environment::with_prefix("PRDCASE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => {
                tracing::info!("No usable config source ({}), using default configuration", e);
                Ok(Self::default())
            }
        }
    }

    /// Fill unset provider settings from the conventional variables
    /// (`OPENAI_API_KEY`, `GEMINI_API_KEY`, `OLLAMA_HOST`, `OLLAMA_MODEL`)
    pub fn apply_provider_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if self.llm.openai_api_key.is_none() {
            self.llm.openai_api_key = lookup("OPENAI_API_KEY");
        }
        if self.llm.gemini_api_key.is_none() {
            self.llm.gemini_api_key = lookup("GEMINI_API_KEY");
        }
        let defaults = LlmSettings::default();
        if self.llm.ollama_host == defaults.ollama_host {
            if let Some(host) = lookup("OLLAMA_HOST") {
                self.llm.ollama_host = host;
            }
        }
        if self.llm.ollama_model == defaults.ollama_model {
            if let Some(model) = lookup("OLLAMA_MODEL") {
                self.llm.ollama_model = model;
            }
        }
        if self.access_password.is_none() {
            self.access_password = lookup("ACCESS_PASSWORD");
        }
    }

    /// Largest request body the JSON extractor accepts: a base64 data URL
    /// of a maximum-size document plus some room for the other fields
    pub fn body_limit(&self) -> usize {
        self.max_document_bytes / 3 * 4 + 64 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prdcase_llm::ProviderKind;
    use std::collections::HashMap;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3001);
        assert_eq!(config.log_level, "info");
        assert!(config.access_password.is_none());
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window_secs, 3600);
        assert_eq!(config.max_document_bytes, 10 * 1024 * 1024);
        assert_eq!(config.llm.provider_kind(), ProviderKind::Ollama);
    }

    #[test]
    fn test_provider_env_fills_missing_keys() {
        let env: HashMap<&str, &str> = [
            ("GEMINI_API_KEY", "g-key"),
            ("OPENAI_API_KEY", ""),
            ("OLLAMA_MODEL", "mistral:7b"),
        ]
        .into_iter()
        .collect();

        let mut config = ServerConfig::default();
        config.apply_provider_env(|key| env.get(key).map(|v| v.to_string()));

        assert!(config.llm.openai_api_key.is_none());
        assert_eq!(config.llm.gemini_api_key.as_deref(), Some("g-key"));
        assert_eq!(config.llm.ollama_model, "mistral:7b");
        assert_eq!(config.llm.provider_kind(), ProviderKind::Gemini);
    }

    #[test]
    fn test_provider_env_does_not_override_config() {
        let mut config = ServerConfig::default();
        config.llm.openai_api_key = Some("from-file".to_string());
        config.apply_provider_env(|_| Some("from-env".to_string()));
        assert_eq!(config.llm.openai_api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_body_limit_covers_base64_document() {
        let config = ServerConfig::default();
        assert!(config.body_limit() > config.max_document_bytes * 4 / 3);
    }
}
