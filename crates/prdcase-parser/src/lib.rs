//! PRDCASE Parser - recovers structured test cases from LLM output
//!
//! The LLM is asked for a six-column markdown table (or Gherkin scenarios)
//! but does not reliably comply. This crate turns whatever text comes back
//! into `TestCase` records through an ordered strategy chain, and exports
//! those records as CSV.

pub mod csv_export;
pub mod error;
pub mod fallback;
pub mod gherkin_parser;
pub mod inference;
pub mod markdown;
pub mod normalizer;
mod patterns;
pub mod table_parser;

// Re-export main parser types
pub use csv_export::{export_file_name, CsvSerializer};
pub use error::{ParseError, Result};
pub use fallback::FallbackExtractor;
pub use gherkin_parser::GherkinScenarioParser;
pub use markdown::render_markdown_table;
pub use normalizer::{NormalizedOutput, NormalizerOptions, ResponseNormalizer, Strategy};
pub use table_parser::TableRowParser;
