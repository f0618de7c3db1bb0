//! Test-suite generation from product requirement documents
//!
//! - Prompt construction: `PromptBuilder` produces the system/user prompt
//!   pair for the table or Gherkin shape
//! - Orchestration: `TestSuiteGenerator` makes one LLM call and normalizes
//!   the reply into `TestCase` records
//!
//! # Example
//! ```no_run
//! use prdcase_core::{OutputFormat, TestCategory};
//! use prdcase_llm::{OllamaProvider, TestSuiteGenerator, TestSuiteGeneratorConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> prdcase_llm::Result<()> {
//! let provider = Arc::new(OllamaProvider::new("http://localhost:11434"));
//! let config = TestSuiteGeneratorConfig::new("llama3.1:8b").with_top_p(0.9);
//! let generator = TestSuiteGenerator::new(provider, config);
//!
//! let prd = std::fs::read_to_string("prd.md").unwrap_or_default();
//! let outcome = generator
//!     .generate(&prd, OutputFormat::Gherkin, &[TestCategory::Functional])
//!     .await?;
//!
//! if outcome.should_show_raw() {
//!     println!("Could not parse, showing raw output:\n{}", outcome.raw_text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod prompt_builder;
pub mod prompt_templates;
pub mod test_suite_generator;

// Re-export main types
pub use prompt_builder::{parse_categories, PromptBuilder, PromptPair};
pub use test_suite_generator::{GenerationOutcome, TestSuiteGenerator, TestSuiteGeneratorConfig};
