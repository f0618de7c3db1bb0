//! Response cache for repeated generation requests

use crate::client::{LLMRequest, LLMResponse};
use async_trait::async_trait;
use dashmap::DashMap;

/// LLM response cache
#[async_trait]
pub trait LLMCache: Send + Sync {
    /// Look up a cached response for an identical request
    async fn get(&self, request: &LLMRequest) -> Option<LLMResponse>;

    /// Store a response
    async fn set(&self, request: LLMRequest, response: LLMResponse);
}

/// Process-local cache keyed by model, system prompt, user prompt and
/// sampling settings. Not shared across instances; cleared on restart.
#[derive(Default)]
pub struct InMemoryLLMCache {
    entries: DashMap<String, LLMResponse>,
}

impl InMemoryLLMCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    fn key(request: &LLMRequest) -> String {
        format!(
            "{}\u{1f}{}\u{1f}{:?}\u{1f}{:?}\u{1f}{:?}\u{1f}{}",
            request.model,
            request.system.as_deref().unwrap_or_default(),
            request.temperature,
            request.top_p,
            request.max_tokens,
            request.prompt
        )
    }
}

#[async_trait]
impl LLMCache for InMemoryLLMCache {
    async fn get(&self, request: &LLMRequest) -> Option<LLMResponse> {
        self.entries
            .get(&Self::key(request))
            .map(|entry| entry.value().clone())
    }

    async fn set(&self, request: LLMRequest, response: LLMResponse) {
        self.entries.insert(Self::key(&request), response);
    }
}
