//! Last-resort recovery when no structured shape was found

use crate::inference::{category_from_id, display_category};
use crate::patterns::TC_ID_ANYWHERE;
use prdcase_core::{Priority, TestCase, TestCategory};

/// Minimum trimmed length (in characters) for text to be worth recovering
pub const NON_TRIVIAL_MIN_CHARS: usize = 50;

/// Raw-dump steps keep only lines longer than this many characters
pub const RAW_LINE_MIN_CHARS: usize = 10;

/// Raw-dump keeps at most this many lines
pub const RAW_DUMP_MAX_STEPS: usize = 5;

/// Id given to the single raw-dump case
pub const RAW_DUMP_ID: &str = "TC-GEN-001";

/// Title given to the single raw-dump case
pub const RAW_DUMP_TITLE: &str = "Generated Test Case (unstructured output)";

/// Heuristic extractors
pub struct FallbackExtractor;

impl FallbackExtractor {
    /// True when the text is long enough to attempt recovery
    pub fn is_non_trivial(raw: &str) -> bool {
        raw.trim().chars().count() >= NON_TRIVIAL_MIN_CHARS
    }

    /// One minimal case per `TC-<letters>-<digits>` occurrence, in order.
    ///
    /// Detected-but-unparsed cases are reported as high priority.
    pub fn id_scan(raw: &str, collapse_extended: bool) -> Vec<TestCase> {
        TC_ID_ANYWHERE
            .find_iter(raw)
            .enumerate()
            .map(|(index, m)| {
                let id = m.as_str();
                let category = category_from_id(id).unwrap_or_default();
                TestCase::new(id, format!("Test Case {}", index + 1))
                    .with_category(display_category(category, collapse_extended))
                    .with_priority(Priority::High)
                    .fill_placeholders(index + 1)
            })
            .collect()
    }

    /// A single case whose steps are the first substantial lines of the text
    pub fn raw_dump(raw: &str) -> TestCase {
        let steps: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| line.chars().count() > RAW_LINE_MIN_CHARS)
            .take(RAW_DUMP_MAX_STEPS)
            .map(String::from)
            .collect();

        TestCase::new(RAW_DUMP_ID, RAW_DUMP_TITLE)
            .with_category(TestCategory::Functional)
            .with_steps(steps)
            .with_priority(Priority::High)
            .fill_placeholders(1)
    }
}
