//! Markdown pipe-table extraction
//!
//! Recognizes rows of the six-column wire format
//!
//! ```text
//! ## Functional Test Cases
//! | ID | Title | Type | Steps | Expected Result | Priority |
//! |----|-------|------|-------|-----------------|----------|
//! | TC-FUNC-001 | ... | Functional | 1. ...<br>2. ... | ... | High |
//! ```
//!
//! Only rows after a separator are data rows, and only rows whose first cell
//! is a `TC-<letters>-<digits>` id become test cases. Everything else is
//! treated as noise and skipped.

use crate::inference::{infer_category, infer_priority, split_steps};
use crate::patterns::{SECTION_HEADER, SEPARATOR_ROW, TC_ID_CELL};
use log::debug;
use prdcase_core::{TestCase, TestCategory};

/// Minimum cells a data row needs: id, title, type, steps, expected, priority
pub const MIN_ROW_CELLS: usize = 6;

/// Table row parser
#[derive(Debug, Clone, Default)]
pub struct TableRowParser {
    collapse_extended: bool,
}

impl TableRowParser {
    /// Create a parser. With `collapse_extended` set, security and ui-ux
    /// rows are reported under the functional category.
    pub fn new(collapse_extended: bool) -> Self {
        Self { collapse_extended }
    }

    /// Extract every accepted data row, in document order
    pub fn parse(&self, content: &str) -> Vec<TestCase> {
        let mut cases = Vec::new();
        let mut section: Option<TestCategory> = None;
        let mut in_table = false;

        for (line_no, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(caps) = SECTION_HEADER.captures(trimmed) {
                section = caps[1].parse().ok();
                in_table = false;
                continue;
            }

            if is_separator_row(trimmed) {
                in_table = true;
                continue;
            }

            if !trimmed.starts_with('|') {
                in_table = false;
                continue;
            }

            if !in_table {
                // Header row of a table that has not reached its separator yet
                continue;
            }

            let cells = split_cells(trimmed);
            if cells.len() < MIN_ROW_CELLS {
                debug!(
                    "line {}: skipping row with {} cells (need {})",
                    line_no + 1,
                    cells.len(),
                    MIN_ROW_CELLS
                );
                continue;
            }

            let id = clean_id(&cells[0]);
            if !TC_ID_CELL.is_match(id) {
                debug!("line {}: skipping row without TC id: {:?}", line_no + 1, cells[0]);
                continue;
            }

            let position = cases.len() + 1;
            let case = TestCase::new(id, cells[1].clone())
                .with_category(infer_category(id, &cells[2], section, self.collapse_extended))
                .with_steps(split_steps(&cells[3]))
                .with_expected_result(cells[4].clone())
                .with_priority(infer_priority(&cells[5]))
                .fill_placeholders(position);
            cases.push(case);
        }

        cases
    }
}

/// A line made only of pipes, dashes, colons and whitespace
pub fn is_separator_row(line: &str) -> bool {
    line.contains('|') && SEPARATOR_ROW.is_match(line)
}

/// Split a row into trimmed cells, dropping the outer pipe boundaries and
/// any dash/colon filler cells. Interior empty cells keep their position.
pub fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    inner
        .split('|')
        .map(str::trim)
        .filter(|cell| !is_filler(cell))
        .map(String::from)
        .collect()
}

fn is_filler(cell: &str) -> bool {
    !cell.is_empty() && cell.chars().all(|c| c == '-' || c == ':')
}

fn clean_id(cell: &str) -> &str {
    cell.trim_matches(|c: char| c == '*' || c == '`' || c.is_whitespace())
}
