//! Gherkin scenario extraction
//!
//! Linear scan over `Scenario:` / `Scenario Outline:` blocks collecting their
//! Given/When/Then/And/But lines. Malformed lines are skipped, never fatal.

use crate::error::{ParseError, Result};
use crate::inference::{category_from_id, display_category};
use crate::patterns::{GHERKIN_STEP, TC_ID_ANYWHERE};
use log::debug;
use prdcase_core::{GherkinScenario, GherkinStep, Priority, StepKeyword, TestCase, TestCategory};

const SCENARIO_PREFIXES: [&str; 2] = ["Scenario Outline:", "Scenario:"];

/// Gherkin scenario parser
pub struct GherkinScenarioParser;

impl GherkinScenarioParser {
    /// Parse scenarios in document order.
    ///
    /// Fails only when `content` is empty or whitespace-only. `@tag` lines
    /// directly above a scenario become that scenario's tags.
    pub fn parse(content: &str) -> Result<Vec<GherkinScenario>> {
        if content.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let mut scenarios = Vec::new();
        let mut current: Option<GherkinScenario> = None;
        let mut pending_tags: Vec<String> = Vec::new();

        for line in content.lines() {
            let trimmed = line.trim();

            if let Some(name) = scenario_name(trimmed) {
                if let Some(done) = current.take() {
                    scenarios.push(done);
                }
                let mut scenario = GherkinScenario::new(name);
                scenario.tags = std::mem::take(&mut pending_tags);
                current = Some(scenario);
                continue;
            }

            if trimmed.starts_with('@') {
                pending_tags.extend(
                    trimmed
                        .split_whitespace()
                        .filter_map(|token| token.strip_prefix('@'))
                        .filter(|tag| !tag.is_empty())
                        .map(String::from),
                );
                continue;
            }

            if trimmed.starts_with("Feature:") {
                pending_tags.clear();
                continue;
            }

            let Some(scenario) = current.as_mut() else {
                continue;
            };

            if let Some(caps) = GHERKIN_STEP.captures(trimmed) {
                if let Ok(keyword) = caps[1].parse::<StepKeyword>() {
                    scenario
                        .steps
                        .push(GherkinStep::new(keyword, caps[2].trim()));
                }
            }
        }

        if let Some(done) = current {
            scenarios.push(done);
        }

        debug!("parsed {} Gherkin scenarios", scenarios.len());
        Ok(scenarios)
    }

    /// Convert parsed scenarios into display test cases.
    ///
    /// The id comes from a `TC-` token in the name or tags, otherwise it is
    /// positional (`TC-<n>`). The category comes from the id, then from a tag
    /// naming one. The priority comes from a tag naming one, else medium.
    pub fn to_test_cases(scenarios: &[GherkinScenario], collapse_extended: bool) -> Vec<TestCase> {
        scenarios
            .iter()
            .enumerate()
            .map(|(index, scenario)| {
                let position = index + 1;
                let tag_text = scenario.tags.join(" ");

                let id = TC_ID_ANYWHERE
                    .find(&scenario.name)
                    .or_else(|| TC_ID_ANYWHERE.find(&tag_text))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| format!("TC-{}", position));

                let title = strip_id_prefix(&scenario.name, &id);

                let category = category_from_id(&id)
                    .or_else(|| {
                        scenario
                            .tags
                            .iter()
                            .find_map(|tag| tag.parse::<TestCategory>().ok())
                    })
                    .unwrap_or_default();

                let priority = scenario
                    .tags
                    .iter()
                    .find_map(|tag| tag.parse::<Priority>().ok())
                    .unwrap_or_default();

                let expected = scenario.outcomes().collect::<Vec<_>>().join("; ");

                TestCase::new(id, title)
                    .with_category(display_category(category, collapse_extended))
                    .with_steps(scenario.steps.iter().map(ToString::to_string))
                    .with_expected_result(expected)
                    .with_priority(priority)
                    .fill_placeholders(position)
            })
            .collect()
    }
}

fn scenario_name(line: &str) -> Option<&str> {
    SCENARIO_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
        .map(str::trim)
}

fn strip_id_prefix(name: &str, id: &str) -> String {
    match name.strip_prefix(id) {
        Some(rest) => rest
            .trim_start_matches(|c: char| c == ':' || c == '-' || c == '–' || c.is_whitespace())
            .to_string(),
        None => name.to_string(),
    }
}
