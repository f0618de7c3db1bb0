//! System/user prompt construction

use crate::generator::prompt_templates::{
    GHERKIN_FORMAT_INSTRUCTIONS, GHERKIN_REQUIREMENTS, SYSTEM_PROMPT, TABLE_FORMAT_INSTRUCTIONS,
    TABLE_REQUIREMENTS, USER_PROMPT_TEMPLATE,
};
use prdcase_core::{OutputFormat, TestCategory};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Categories requested unconditionally on top of the caller's selection
pub const ALWAYS_REQUESTED: [TestCategory; 2] = [TestCategory::Security, TestCategory::UiUx];

/// A system message plus the user prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Builds generation prompts. Pure: no I/O, cannot fail.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the prompt pair for `document`.
    ///
    /// An empty `requested` slice means the default functional, edge-case and
    /// negative selection. Security and ui-ux are always added. Empty
    /// document text is passed through unchanged.
    pub fn build(
        &self,
        document: &str,
        format: OutputFormat,
        requested: &[TestCategory],
    ) -> PromptPair {
        let categories = Self::effective_categories(requested);

        let (format_instructions, requirements) = match format {
            OutputFormat::Table => (TABLE_FORMAT_INSTRUCTIONS, TABLE_REQUIREMENTS),
            OutputFormat::Gherkin => (GHERKIN_FORMAT_INSTRUCTIONS, GHERKIN_REQUIREMENTS),
        };

        let user = USER_PROMPT_TEMPLATE
            .replace("{format_instructions}", format_instructions)
            .replace("{category_instructions}", &category_instructions(&categories))
            .replace("{requirements}", requirements)
            .replace("{document}", document);

        PromptPair {
            system: SYSTEM_PROMPT.to_string(),
            user,
        }
    }

    /// Requested categories, deduplicated in order, with the always-requested
    /// ones appended
    pub fn effective_categories(requested: &[TestCategory]) -> Vec<TestCategory> {
        let base: &[TestCategory] = if requested.is_empty() {
            &TestCategory::DEFAULT_REQUESTED[..]
        } else {
            requested
        };

        let mut categories: Vec<TestCategory> = Vec::with_capacity(base.len() + 2);
        for category in base.iter().chain(ALWAYS_REQUESTED.iter()) {
            if !categories.contains(category) {
                categories.push(*category);
            }
        }
        categories
    }
}

fn category_instruction(category: TestCategory) -> String {
    let (label, volume, focus) = match category {
        TestCategory::Functional => (
            "FUNCTIONAL",
            "5-10",
            "that verify core functionality works as specified in the PRD",
        ),
        TestCategory::EdgeCase => (
            "EDGE CASE",
            "3-7",
            "for boundary conditions, maximum/minimum values, and unusual but valid inputs",
        ),
        TestCategory::Negative => (
            "NEGATIVE",
            "3-7",
            "that verify proper error handling, validation, and rejection of invalid inputs",
        ),
        TestCategory::Security => (
            "SECURITY",
            "2-5",
            "for authentication, authorization, and data protection",
        ),
        TestCategory::UiUx => (
            "UI/UX",
            "2-5",
            "for user interface, accessibility, and user experience",
        ),
    };
    let prefix = category.id_prefix();
    format!(
        "{}: Generate {} test cases {}. Use TC-{}-001, TC-{}-002, etc.",
        label, volume, focus, prefix, prefix
    )
}

fn category_instructions(categories: &[TestCategory]) -> String {
    categories
        .iter()
        .map(|c| category_instruction(*c))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a comma-separated category list such as `"functional, edge-case"`.
///
/// Unknown names are skipped with a warning; duplicates are dropped.
pub fn parse_categories(list: &str) -> Vec<TestCategory> {
    let mut categories = Vec::new();
    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match name.parse::<TestCategory>() {
            Ok(category) if !categories.contains(&category) => categories.push(category),
            Ok(_) => {}
            Err(e) => warn!("ignoring scenario type {:?}: {}", name, e),
        }
    }
    categories
}
