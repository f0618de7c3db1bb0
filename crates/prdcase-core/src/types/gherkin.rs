//! Intermediate Gherkin parse units

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Step keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKeyword {
    Given,
    When,
    Then,
    And,
    But,
}

impl StepKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKeyword::Given => "Given",
            StepKeyword::When => "When",
            StepKeyword::Then => "Then",
            StepKeyword::And => "And",
            StepKeyword::But => "But",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepKeyword {
    type Err = CoreError;

    /// Keywords are case-sensitive, as in Gherkin itself
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Given" => Ok(StepKeyword::Given),
            "When" => Ok(StepKeyword::When),
            "Then" => Ok(StepKeyword::Then),
            "And" => Ok(StepKeyword::And),
            "But" => Ok(StepKeyword::But),
            _ => Err(CoreError::UnknownKeyword(s.to_string())),
        }
    }
}

/// One Given/When/Then/And/But line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GherkinStep {
    pub keyword: StepKeyword,
    pub text: String,
}

impl GherkinStep {
    pub fn new(keyword: StepKeyword, text: impl Into<String>) -> Self {
        Self {
            keyword,
            text: text.into(),
        }
    }
}

impl fmt::Display for GherkinStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.keyword, self.text)
    }
}

/// A `Scenario:` / `Scenario Outline:` block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GherkinScenario {
    pub name: String,
    pub steps: Vec<GherkinStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl GherkinScenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Text of every `Then` step, in order
    pub fn outcomes(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .filter(|step| step.keyword == StepKeyword::Then)
            .map(|step| step.text.as_str())
    }
}
