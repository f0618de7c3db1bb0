//! Test case records recovered from generated test suites
//!
//! A `TestCase` is the canonical output unit of normalization. Every record
//! handed out by the parser satisfies the same invariants: non-empty id,
//! title, steps and expected result, and a priority from the closed set.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Test case category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TestCategory {
    /// Core functionality works as specified
    #[serde(rename = "functional")]
    Functional,
    /// Error handling and rejection of invalid input
    #[serde(rename = "negative")]
    Negative,
    /// Boundary conditions and unusual but valid input
    #[serde(rename = "edge-case")]
    EdgeCase,
    /// Authentication, authorization and data protection
    #[serde(rename = "security")]
    Security,
    /// Interface, accessibility and user experience
    #[serde(rename = "ui-ux")]
    UiUx,
}

impl TestCategory {
    /// All categories in prompt/section order
    pub const ALL: [TestCategory; 5] = [
        TestCategory::Functional,
        TestCategory::Negative,
        TestCategory::EdgeCase,
        TestCategory::Security,
        TestCategory::UiUx,
    ];

    /// Categories requested when the caller does not choose any
    pub const DEFAULT_REQUESTED: [TestCategory; 3] = [
        TestCategory::Functional,
        TestCategory::EdgeCase,
        TestCategory::Negative,
    ];

    /// Wire name (`functional`, `edge-case`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            TestCategory::Functional => "functional",
            TestCategory::Negative => "negative",
            TestCategory::EdgeCase => "edge-case",
            TestCategory::Security => "security",
            TestCategory::UiUx => "ui-ux",
        }
    }

    /// Human-readable name used in section headers (`## Edge Case Test Cases`)
    pub fn display_name(&self) -> &'static str {
        match self {
            TestCategory::Functional => "Functional",
            TestCategory::Negative => "Negative",
            TestCategory::EdgeCase => "Edge Case",
            TestCategory::Security => "Security",
            TestCategory::UiUx => "UI/UX",
        }
    }

    /// Category segment of the `TC-<CATEGORY>-<NNN>` id convention
    pub fn id_prefix(&self) -> &'static str {
        match self {
            TestCategory::Functional => "FUNC",
            TestCategory::Negative => "NEG",
            TestCategory::EdgeCase => "EDGE",
            TestCategory::Security => "SEC",
            TestCategory::UiUx => "UI",
        }
    }

    /// Whether this is one of the categories the prompt always appends
    pub fn is_extended(&self) -> bool {
        matches!(self, TestCategory::Security | TestCategory::UiUx)
    }
}

impl Default for TestCategory {
    fn default() -> Self {
        TestCategory::Functional
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestCategory {
    type Err = CoreError;

    /// Accepts wire names, display names and the id prefixes, ignoring case
    /// and separators (`Edge Case`, `EdgeCase`, `edge-case`, `UI/UX`, `ui`).
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_' | '/'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "functional" | "func" => Ok(TestCategory::Functional),
            "negative" | "neg" => Ok(TestCategory::Negative),
            "edgecase" | "edge" => Ok(TestCategory::EdgeCase),
            "security" | "sec" => Ok(TestCategory::Security),
            "uiux" | "ui" | "ux" => Ok(TestCategory::UiUx),
            _ => Err(CoreError::UnknownCategory(s.to_string())),
        }
    }
}

/// Test case priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    /// Strict, case-insensitive parse. Lenient cell inference lives in the
    /// parser crate.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(CoreError::UnknownPriority(s.to_string())),
        }
    }
}

/// A single generated test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Identifier, usually `TC-<CATEGORY>-<NNN>` but accepted as-is
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Display category
    pub category: TestCategory,

    /// Ordered steps
    pub steps: Vec<String>,

    /// Expected result
    pub expected_result: String,

    /// Priority
    pub priority: Priority,
}

impl TestCase {
    /// Step substituted when extraction yields nothing
    pub const STEPS_PLACEHOLDER: &'static str = "No steps provided";

    /// Expected result substituted when the source has none
    pub const EXPECTED_RESULT_PLACEHOLDER: &'static str = "Verify the expected behavior";

    /// Create a test case with default category and priority and no steps
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: TestCategory::default(),
            steps: Vec::new(),
            expected_result: String::new(),
            priority: Priority::default(),
        }
    }

    pub fn with_category(mut self, category: TestCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_expected_result(mut self, expected_result: impl Into<String>) -> Self {
        self.expected_result = expected_result.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Substitute positional placeholders for any empty field.
    ///
    /// `position` is the 1-based index of the case in its result sequence.
    pub fn fill_placeholders(mut self, position: usize) -> Self {
        if self.id.trim().is_empty() {
            self.id = format!("TC-{}", position);
        }
        if self.title.trim().is_empty() {
            self.title = format!("Test Case {}", position);
        }
        self.steps.retain(|step| !step.trim().is_empty());
        if self.steps.is_empty() {
            self.steps.push(Self::STEPS_PLACEHOLDER.to_string());
        }
        if self.expected_result.trim().is_empty() {
            self.expected_result = Self::EXPECTED_RESULT_PLACEHOLDER.to_string();
        }
        self
    }

    /// True when every display invariant holds
    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty()
            && !self.title.trim().is_empty()
            && !self.steps.is_empty()
            && self.steps.iter().all(|s| !s.trim().is_empty())
            && !self.expected_result.trim().is_empty()
    }
}
