//! Ollama provider implementation
//!
//! Talks to a local Ollama daemon through its `/api/chat` endpoint with
//! streaming disabled.

use super::DEFAULT_TIMEOUT;
use crate::cache::LLMCache;
use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{LLMError, Result};
use crate::provider::LLMProvider;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default nucleus sampling cutoff sent to Ollama
pub const DEFAULT_TOP_P: f32 = 0.9;

/// Timeout for the `/api/tags` health probe
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Ollama provider
pub struct OllamaProvider {
    host: String,
    timeout: Duration,
    cache: Option<Arc<dyn LLMCache>>,
    client: Client,
}

/// Result of probing an Ollama daemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OllamaHealth {
    pub available: bool,
    pub host: String,
    pub model: String,
    pub model_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OllamaProvider {
    /// Create a provider for the daemon at `host` (e.g. `http://localhost:11434`)
    pub fn new(host: impl Into<String>) -> Self {
        let host: String = host.into();
        Self {
            host: host.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache: None,
            client: Client::new(),
        }
    }

    /// Attach a response cache
    pub fn cache(mut self, cache: Arc<dyn LLMCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Names of the models pulled on the daemon
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let resp = self
            .client
            .get(format!("{}/api/tags", self.host))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                LLMError::ApiCallFailed(format!(
                    "Ollama API error: {}. Is Ollama running at {}?",
                    e, self.host
                ))
            })?;

        if !resp.status().is_success() {
            return Err(LLMError::ApiCallFailed(format!(
                "Ollama tags request failed ({})",
                resp.status()
            )));
        }

        let body: serde_json::Value = resp.json().await?;
        Ok(body["models"]
            .as_array()
            .map(|models| {
                models
                    .iter()
                    .filter_map(|m| m["name"].as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Probe the daemon and check that the family of `model` is pulled.
    ///
    /// Never fails; an unreachable daemon is reported as unavailable.
    pub async fn health(&self, model: &str) -> OllamaHealth {
        match self.list_models().await {
            Ok(models) => OllamaHealth {
                available: true,
                host: self.host.clone(),
                model: model.to_string(),
                model_available: has_model_family(&models, model),
                error: None,
            },
            Err(e) => {
                warn!("Ollama health probe failed: {}", e);
                OllamaHealth {
                    available: false,
                    host: self.host.clone(),
                    model: model.to_string(),
                    model_available: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// True when any pulled model name contains the family part of `model`
/// (`llama3.1:8b` -> `llama3.1`).
pub fn has_model_family(models: &[String], model: &str) -> bool {
    let family = model.split(':').next().unwrap_or(model);
    models.iter().any(|name| name.contains(family))
}

#[async_trait]
impl LLMClient for OllamaProvider {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.get(&request).await {
                return Ok(cached);
            }
        }

        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(json!({
                "role": "system",
                "content": system
            }));
        }
        messages.push(json!({
            "role": "user",
            "content": request.prompt
        }));

        let mut options = json!({
            "top_p": request.top_p.unwrap_or(DEFAULT_TOP_P),
        });
        if let Some(temperature) = request.temperature {
            options["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = request.max_tokens {
            options["num_predict"] = json!(max_tokens);
        }

        let body = json!({
            "model": request.model,
            "messages": messages,
            "stream": false,
            "options": options,
        });

        debug!("calling Ollama at {} with model {}", self.host, request.model);

        let resp = self
            .client
            .post(format!("{}/api/chat", self.host))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                LLMError::ApiCallFailed(format!(
                    "Ollama API error: {}. Is Ollama running at {}?",
                    e, self.host
                ))
            })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LLMError::ModelNotFound(format!(
                "\"{model}\" is not pulled. Run: ollama pull {model}",
                model = request.model
            )));
        }

        let resp_text = resp
            .text()
            .await
            .map_err(|e| LLMError::ApiCallFailed(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(LLMError::ApiCallFailed(format!(
                "Ollama API error ({}): {}",
                status, resp_text
            )));
        }

        let resp_json: serde_json::Value = serde_json::from_str(&resp_text)
            .map_err(|e| LLMError::ApiCallFailed(format!("Failed to parse response: {}", e)))?;

        let content = resp_json["message"]["content"]
            .as_str()
            .ok_or_else(|| LLMError::InvalidResponse("No content in response".to_string()))?
            .to_string();

        let finish_reason = resp_json["done_reason"]
            .as_str()
            .unwrap_or("stop")
            .to_string();

        let tokens_used = resp_json["prompt_eval_count"].as_u64().unwrap_or(0)
            + resp_json["eval_count"].as_u64().unwrap_or(0);

        let response = LLMResponse::new(content, request.model.clone())
            .with_tokens(tokens_used as u32)
            .with_finish_reason(finish_reason);

        if let Some(ref cache) = self.cache {
            cache.set(request, response.clone()).await;
        }

        Ok(response)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

impl LLMProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "Ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434/");
        assert_eq!(provider.name(), "ollama");
        assert_eq!(provider.provider_name(), "Ollama");
        assert_eq!(provider.host(), "http://localhost:11434");
    }

    #[test]
    fn test_model_family_match() {
        let models = vec!["llama3.1:latest".to_string(), "mistral:7b".to_string()];
        assert!(has_model_family(&models, "llama3.1:8b"));
        assert!(has_model_family(&models, "mistral"));
        assert!(!has_model_family(&models, "gpt-oss:20b"));
        assert!(!has_model_family(&[], "llama3.1:8b"));
    }

    #[tokio::test]
    async fn test_unreachable_daemon_is_unhealthy() {
        // Port 9 (discard) is not an Ollama daemon
        let provider = OllamaProvider::new("http://127.0.0.1:9");
        let health = provider.health("llama3.1:8b").await;
        assert!(!health.available);
        assert!(!health.model_available);
        assert!(health.error.is_some());
    }
}
