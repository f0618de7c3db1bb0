//! OpenAI provider implementation

use super::DEFAULT_TIMEOUT;
use crate::cache::LLMCache;
use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{LLMError, Result};
use crate::provider::LLMProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat completions provider
pub struct OpenAIProvider {
    api_key: String,
    base_url: String,
    timeout: Duration,
    cache: Option<Arc<dyn LLMCache>>,
    client: Client,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create with custom base URL (e.g., for Azure OpenAI or a proxy)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache: None,
            client: Client::new(),
        }
    }

    /// Create with cache
    pub fn with_cache(api_key: String, cache: Arc<dyn LLMCache>) -> Self {
        Self::new(api_key).cache(cache)
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
}

#[async_trait]
impl LLMClient for OpenAIProvider {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        // Check cache first
        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.get(&request).await {
                debug!("openai cache hit for model {}", request.model);
                return Ok(cached);
            }
        }

        // Build messages
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

        // Build request body
        let mut body = json!({
            "model": request.model,
            "messages": messages,
        });
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(top_p) = request.top_p {
            body["top_p"] = json!(top_p);
        }

        // Make API call
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| LLMError::ApiCallFailed(format!("OpenAI API call failed: {}", e)))?;

        let status = resp.status();
        let resp_text = resp
            .text()
            .await
            .map_err(|e| LLMError::ApiCallFailed(format!("Failed to read response: {}", e)))?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LLMError::ModelNotFound(format!(
                "OpenAI model \"{}\" is not available: {}",
                request.model, resp_text
            )));
        }
        if !status.is_success() {
            return Err(LLMError::ApiCallFailed(format!(
                "OpenAI API error ({}): {}",
                status, resp_text
            )));
        }

        // Parse response
        let resp_json: serde_json::Value = serde_json::from_str(&resp_text)
            .map_err(|e| LLMError::ApiCallFailed(format!("Failed to parse response: {}", e)))?;

        let content = resp_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| LLMError::InvalidResponse("No content in response".to_string()))?
            .to_string();

        let finish_reason = resp_json["choices"][0]["finish_reason"]
            .as_str()
            .unwrap_or("stop")
            .to_string();

        let tokens_used = resp_json["usage"]["total_tokens"].as_u64().unwrap_or(0) as u32;

        let response = LLMResponse::new(content, request.model.clone())
            .with_tokens(tokens_used)
            .with_finish_reason(finish_reason);

        // Store in cache
        if let Some(ref cache) = self.cache {
            cache.set(request, response.clone()).await;
        }

        Ok(response)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

impl LLMProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "OpenAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryLLMCache;

    #[tokio::test]
    async fn test_openai_provider_creation() {
        let provider = OpenAIProvider::new("test-key".to_string());
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.provider_name(), "OpenAI");
        assert_eq!(provider.timeout, DEFAULT_TIMEOUT);
    }

    #[tokio::test]
    async fn test_cached_response_skips_network() {
        let cache = Arc::new(InMemoryLLMCache::new());
        let request = LLMRequest::new("prd".to_string(), "gpt-4o-mini".to_string());
        let cached = LLMResponse::new("| TC-FUNC-001 |".to_string(), "gpt-4o-mini".to_string());
        cache.set(request.clone(), cached.clone()).await;

        let provider = OpenAIProvider::with_base_url("k".to_string(), "http://127.0.0.1:9".to_string())
            .cache(cache);
        assert_eq!(provider.call(request).await.unwrap(), cached);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let provider = OpenAIProvider::with_base_url("k".to_string(), "http://proxy/v1/".to_string())
            .with_timeout(Duration::from_secs(5));
        assert_eq!(provider.base_url, "http://proxy/v1");
        assert_eq!(provider.timeout, Duration::from_secs(5));
    }
}
