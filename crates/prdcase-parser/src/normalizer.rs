//! Response normalization strategy chain
//!
//! The raw LLM reply is untrusted: it may ignore the requested format, mix
//! formats, or be plain prose. Strategies are tried in order and the first
//! one producing at least one test case wins:
//!
//! 1. `StructuredTable` - six-column pipe tables (any declared format)
//! 2. `GherkinScenarios` - Scenario blocks (gherkin format only)
//! 3. `IdScanFallback` - one minimal case per `TC-` id found anywhere
//! 4. `RawDump` - one case built from the first substantial lines
//! 5. `Empty` - nothing worth recovering
//!
//! Normalization never fails.

use crate::fallback::FallbackExtractor;
use crate::gherkin_parser::GherkinScenarioParser;
use crate::table_parser::TableRowParser;
use log::{debug, warn};
use prdcase_core::{OutputFormat, TestCase};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalizer options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerOptions {
    /// Report security and ui-ux cases under the functional category.
    ///
    /// Defaults to `true`, the established display behavior.
    #[serde(default = "default_collapse")]
    pub collapse_extended_categories: bool,
}

fn default_collapse() -> bool {
    true
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            collapse_extended_categories: default_collapse(),
        }
    }
}

impl NormalizerOptions {
    pub fn with_collapse_extended_categories(mut self, collapse: bool) -> Self {
        self.collapse_extended_categories = collapse;
        self
    }
}

/// A recovery strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    StructuredTable,
    GherkinScenarios,
    IdScanFallback,
    RawDump,
    Empty,
}

impl Strategy {
    /// Strategy order for a declared output format
    pub fn chain(format: OutputFormat) -> &'static [Strategy] {
        match format {
            OutputFormat::Table => &[
                Strategy::StructuredTable,
                Strategy::IdScanFallback,
                Strategy::RawDump,
                Strategy::Empty,
            ],
            OutputFormat::Gherkin => &[
                Strategy::StructuredTable,
                Strategy::GherkinScenarios,
                Strategy::IdScanFallback,
                Strategy::RawDump,
                Strategy::Empty,
            ],
        }
    }

    /// Run this strategy. `None` means "no result, try the next one".
    pub fn apply(&self, raw: &str, options: &NormalizerOptions) -> Option<Vec<TestCase>> {
        let collapse = options.collapse_extended_categories;
        let cases = match self {
            Strategy::StructuredTable => TableRowParser::new(collapse).parse(raw),
            Strategy::GherkinScenarios => match GherkinScenarioParser::parse(raw) {
                Ok(scenarios) => GherkinScenarioParser::to_test_cases(&scenarios, collapse),
                Err(_) => Vec::new(),
            },
            Strategy::IdScanFallback if FallbackExtractor::is_non_trivial(raw) => {
                FallbackExtractor::id_scan(raw, collapse)
            }
            Strategy::RawDump if FallbackExtractor::is_non_trivial(raw) => {
                vec![FallbackExtractor::raw_dump(raw)]
            }
            Strategy::IdScanFallback | Strategy::RawDump => Vec::new(),
            Strategy::Empty => return Some(Vec::new()),
        };

        if cases.is_empty() {
            None
        } else {
            Some(cases)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::StructuredTable => "structured_table",
            Strategy::GherkinScenarios => "gherkin_scenarios",
            Strategy::IdScanFallback => "id_scan_fallback",
            Strategy::RawDump => "raw_dump",
            Strategy::Empty => "empty",
        }
    }

    /// True for strategies that recovered the cases from structure
    pub fn is_structured(&self) -> bool {
        matches!(self, Strategy::StructuredTable | Strategy::GherkinScenarios)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized cases plus the strategy that produced them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedOutput {
    pub cases: Vec<TestCase>,
    pub strategy: Strategy,
}

impl NormalizedOutput {
    /// True when no strategy recovered anything
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Turns raw LLM text into ordered `TestCase` records
#[derive(Debug, Clone, Default)]
pub struct ResponseNormalizer {
    options: NormalizerOptions,
}

impl ResponseNormalizer {
    pub fn new(options: NormalizerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizerOptions {
        &self.options
    }

    /// Normalize `raw` into test cases in document order
    pub fn normalize(&self, raw: &str, format: OutputFormat) -> Vec<TestCase> {
        self.normalize_detailed(raw, format).cases
    }

    /// Normalize and report which strategy produced the result
    pub fn normalize_detailed(&self, raw: &str, format: OutputFormat) -> NormalizedOutput {
        for strategy in Strategy::chain(format) {
            if let Some(cases) = strategy.apply(raw, &self.options) {
                if !strategy.is_structured() && !cases.is_empty() {
                    warn!(
                        "no structured {} output recovered; {} produced {} case(s)",
                        format,
                        strategy,
                        cases.len()
                    );
                }
                debug!("strategy {} produced {} case(s)", strategy, cases.len());
                return NormalizedOutput {
                    cases,
                    strategy: *strategy,
                };
            }
            debug!("strategy {} produced nothing", strategy);
        }

        NormalizedOutput {
            cases: Vec::new(),
            strategy: Strategy::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prdcase_core::{Priority, TestCategory};

    #[test]
    fn test_chain_order() {
        assert_eq!(Strategy::chain(OutputFormat::Table)[0], Strategy::StructuredTable);
        assert!(!Strategy::chain(OutputFormat::Table).contains(&Strategy::GherkinScenarios));
        assert_eq!(Strategy::chain(OutputFormat::Gherkin)[1], Strategy::GherkinScenarios);
        assert_eq!(
            Strategy::chain(OutputFormat::Gherkin).last(),
            Some(&Strategy::Empty)
        );
    }

    #[test]
    fn test_empty_input() {
        let out = ResponseNormalizer::default().normalize_detailed("", OutputFormat::Table);
        assert!(out.is_empty());
        assert_eq!(out.strategy, Strategy::Empty);
    }

    #[test]
    fn test_short_input_is_empty() {
        let out = ResponseNormalizer::default().normalize("TC-FUNC-001 ok", OutputFormat::Table);
        assert!(out.is_empty());
    }

    #[test]
    fn test_id_scan_when_table_missing() {
        let raw = "Here are the cases: TC-FUNC-001 login works, TC-NEG-001 wrong password fails.";
        let out = ResponseNormalizer::default().normalize_detailed(raw, OutputFormat::Table);
        assert_eq!(out.strategy, Strategy::IdScanFallback);
        assert_eq!(out.cases.len(), 2);
        assert_eq!(out.cases[1].category, TestCategory::Negative);
    }

    #[test]
    fn test_raw_dump_for_prose() {
        let raw = "I could not produce a table for this document.\nThe document describes a login flow with MFA.";
        let out = ResponseNormalizer::default().normalize_detailed(raw, OutputFormat::Table);
        assert_eq!(out.strategy, Strategy::RawDump);
        assert_eq!(out.cases.len(), 1);
        assert_eq!(out.cases[0].priority, Priority::High);
    }

    #[test]
    fn test_gherkin_strategy_only_for_gherkin_format() {
        let raw = "Feature: Login\n  Scenario: Valid login\n    Given a registered user\n    Then the dashboard is shown\n";

        let gherkin = ResponseNormalizer::default().normalize_detailed(raw, OutputFormat::Gherkin);
        assert_eq!(gherkin.strategy, Strategy::GherkinScenarios);
        assert_eq!(gherkin.cases[0].title, "Valid login");

        let table = ResponseNormalizer::default().normalize_detailed(raw, OutputFormat::Table);
        assert_eq!(table.strategy, Strategy::RawDump);
    }

    #[test]
    fn test_options_default_collapses() {
        assert!(NormalizerOptions::default().collapse_extended_categories);
        let opts: NormalizerOptions = serde_json::from_str("{}").unwrap();
        assert!(opts.collapse_extended_categories);
    }
}
