//! Test-suite generation: prompt -> one LLM call -> normalization

use crate::client::{LLMClient, LLMRequest};
use crate::error::{LLMError, Result};
use crate::generator::prompt_builder::PromptBuilder;
use prdcase_core::{OutputFormat, TestCase, TestCategory};
use prdcase_parser::{CsvSerializer, NormalizerOptions, ResponseNormalizer, Strategy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Configuration for test-suite generation
#[derive(Debug, Clone)]
pub struct TestSuiteGeneratorConfig {
    /// Model to use for generation (e.g., "gpt-4o-mini", "llama3.1:8b")
    pub model: String,
    /// Maximum tokens for response
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 1.0, lower = more deterministic)
    pub temperature: Option<f32>,
    /// Nucleus sampling cutoff; providers apply their own default when unset
    pub top_p: Option<f32>,
    /// How the reply is normalized
    pub normalizer: NormalizerOptions,
}

impl Default for TestSuiteGeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: Some(4000),
            temperature: Some(0.2),
            top_p: None,
            normalizer: NormalizerOptions::default(),
        }
    }
}

impl TestSuiteGeneratorConfig {
    /// Create a new configuration with a specific model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set top_p
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set normalizer options
    pub fn with_normalizer(mut self, normalizer: NormalizerOptions) -> Self {
        self.normalizer = normalizer;
        self
    }
}

/// Everything one generation produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    /// The model's reply, verbatim
    pub raw_text: String,
    pub format: OutputFormat,
    pub test_cases: Vec<TestCase>,
    /// Strategy that recovered `test_cases`
    pub strategy: Strategy,
    /// False when nothing could be recovered from `raw_text`
    pub parsed: bool,
    pub provider: String,
    pub model: String,
    pub tokens_used: u32,
    /// The reply hit the token limit and may be cut off
    pub truncated: bool,
}

impl GenerationOutcome {
    /// True when the caller should display `raw_text` with a
    /// "could not parse, showing raw output" notice
    pub fn should_show_raw(&self) -> bool {
        !self.parsed && !self.raw_text.trim().is_empty()
    }
}

/// Test-suite generator using an LLM
pub struct TestSuiteGenerator {
    client: Arc<dyn LLMClient>,
    config: TestSuiteGeneratorConfig,
    prompts: PromptBuilder,
    normalizer: ResponseNormalizer,
}

impl TestSuiteGenerator {
    /// Create a new generator
    pub fn new(client: Arc<dyn LLMClient>, config: TestSuiteGeneratorConfig) -> Self {
        let normalizer = ResponseNormalizer::new(config.normalizer);
        Self {
            client,
            config,
            prompts: PromptBuilder::new(),
            normalizer,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, TestSuiteGeneratorConfig::default())
    }

    pub fn config(&self) -> &TestSuiteGeneratorConfig {
        &self.config
    }

    /// Name of the client answering requests
    pub fn provider_name(&self) -> &str {
        self.client.name()
    }

    /// Generate a test suite for `document`.
    ///
    /// Makes exactly one LLM call; failures are returned as-is, never
    /// retried. An unusable reply is not an error: the outcome then has
    /// `parsed == false` and the raw text.
    ///
    /// # Example
    /// ```no_run
    /// use prdcase_core::OutputFormat;
    /// use prdcase_llm::{MockProvider, TestSuiteGenerator};
    /// use std::sync::Arc;
    ///
    /// # async fn example() -> prdcase_llm::Result<()> {
    /// let provider = Arc::new(MockProvider::new());
    /// let generator = TestSuiteGenerator::with_defaults(provider);
    ///
    /// let outcome = generator
    ///     .generate("Users can reset their password by email.", OutputFormat::Table, &[])
    ///     .await?;
    /// println!("{} test cases", outcome.test_cases.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(
        &self,
        document: &str,
        format: OutputFormat,
        categories: &[TestCategory],
    ) -> Result<GenerationOutcome> {
        if document.trim().is_empty() {
            return Err(LLMError::InvalidConfiguration(
                "document text is empty".to_string(),
            ));
        }

        let prompts = self.prompts.build(document, format, categories);

        let mut request = LLMRequest::new(prompts.user, self.config.model.clone())
            .with_system(prompts.system);
        request.max_tokens = self.config.max_tokens;
        request.temperature = self.config.temperature;
        request.top_p = self.config.top_p;

        info!(
            "generating {} test suite with {} ({}), document {} chars",
            format,
            self.client.name(),
            self.config.model,
            document.chars().count()
        );

        let response = self.client.call(request).await?;
        let truncated = response.is_truncated();
        if truncated {
            warn!("reply from {} hit the token limit", self.client.name());
        }

        let normalized = self.normalizer.normalize_detailed(&response.content, format);
        let parsed = !normalized.is_empty();

        info!(
            "generation finished: {} test case(s) via {}, {} tokens",
            normalized.cases.len(),
            normalized.strategy,
            response.tokens_used
        );

        Ok(GenerationOutcome {
            raw_text: response.content,
            format,
            test_cases: normalized.cases,
            strategy: normalized.strategy,
            parsed,
            provider: self.client.name().to_string(),
            model: response.model,
            tokens_used: response.tokens_used,
            truncated,
        })
    }

    /// CSV export of an outcome, built from its structured cases
    pub fn to_csv(&self, outcome: &GenerationOutcome) -> Result<String> {
        let serializer = CsvSerializer::with_normalizer(self.normalizer.clone());
        Ok(serializer.serialize(&outcome.test_cases, outcome.format)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;

    const TABLE_REPLY: &str = "## Functional Test Cases\n\
| ID | Title | Type | Steps | Expected Result | Priority |\n\
|----|-------|------|-------|------------------|----------|\n\
| TC-FUNC-001 | Login succeeds | Functional | 1. Open login<br>2. Submit | Dashboard shown | High |\n";

    #[test]
    fn test_config_builder() {
        let config = TestSuiteGeneratorConfig::new("llama3.1:8b")
            .with_temperature(0.5)
            .with_max_tokens(1000)
            .with_top_p(0.9);
        assert_eq!(config.model, "llama3.1:8b");
        assert_eq!(config.temperature, Some(0.5));
        assert_eq!(config.max_tokens, Some(1000));
        assert_eq!(config.top_p, Some(0.9));
        assert!(config.normalizer.collapse_extended_categories);
    }

    #[tokio::test]
    async fn test_generate_parses_table_reply() {
        let provider = Arc::new(MockProvider::with_response(TABLE_REPLY.to_string()));
        let generator = TestSuiteGenerator::with_defaults(provider.clone());

        let outcome = generator
            .generate("Users log in with email.", OutputFormat::Table, &[])
            .await
            .unwrap();

        assert!(outcome.parsed);
        assert!(!outcome.should_show_raw());
        assert_eq!(outcome.strategy, Strategy::StructuredTable);
        assert_eq!(outcome.test_cases.len(), 1);
        assert_eq!(outcome.provider, "mock");
        assert_eq!(outcome.raw_text, TABLE_REPLY);

        let request = &provider.requests()[0];
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.temperature, Some(0.2));
        assert!(request.system.is_some());
        assert!(request.prompt.contains("Users log in with email."));
    }

    #[tokio::test]
    async fn test_empty_document_is_rejected_before_call() {
        let provider = Arc::new(MockProvider::new());
        let generator = TestSuiteGenerator::with_defaults(provider.clone());

        let err = generator
            .generate(" \n ", OutputFormat::Table, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::InvalidConfiguration(_)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_short_unusable_reply_shows_raw() {
        let provider = Arc::new(MockProvider::with_response("Sorry, no.".to_string()));
        let generator = TestSuiteGenerator::with_defaults(provider);

        let outcome = generator
            .generate("PRD", OutputFormat::Gherkin, &[])
            .await
            .unwrap();
        assert!(!outcome.parsed);
        assert!(outcome.should_show_raw());
        assert_eq!(outcome.strategy, Strategy::Empty);
    }

    #[tokio::test]
    async fn test_to_csv() {
        let provider = Arc::new(MockProvider::with_response(TABLE_REPLY.to_string()));
        let generator = TestSuiteGenerator::with_defaults(provider);
        let outcome = generator
            .generate("PRD", OutputFormat::Table, &[])
            .await
            .unwrap();

        let csv = generator.to_csv(&outcome).unwrap();
        assert!(csv.starts_with("\"ID\",\"Title\",\"Type\""));
        assert!(csv.contains("\"Open login; Submit\""));
    }
}
