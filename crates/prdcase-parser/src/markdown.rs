//! Re-emits test cases in the six-column markdown wire format

use prdcase_core::{TestCase, TestCategory};
use std::fmt::Write;

/// Column header of the wire format
pub const TABLE_HEADER: &str = "| ID | Title | Type | Steps | Expected Result | Priority |";

/// Separator row emitted under the header
pub const TABLE_SEPARATOR: &str = "|----|-------|------|-------|-----------------|----------|";

/// Render cases as `## <Category> Test Cases` sections, one table each.
///
/// Sections follow the canonical category order; within a section cases keep
/// their input order. Steps are numbered and joined with `<br>`.
pub fn render_markdown_table(cases: &[TestCase]) -> String {
    let mut out = String::new();

    for category in TestCategory::ALL {
        let rows: Vec<&TestCase> = cases.iter().filter(|c| c.category == category).collect();
        if rows.is_empty() {
            continue;
        }

        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "## {} Test Cases", category.display_name());
        let _ = writeln!(out, "{}", TABLE_HEADER);
        let _ = writeln!(out, "{}", TABLE_SEPARATOR);

        for case in rows {
            let steps = case
                .steps
                .iter()
                .enumerate()
                .map(|(i, step)| format!("{}. {}", i + 1, cell(step)))
                .collect::<Vec<_>>()
                .join("<br>");

            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                cell(&case.id),
                cell(&case.title),
                category.display_name(),
                steps,
                cell(&case.expected_result),
                case.priority
            );
        }
    }

    out
}

fn cell(text: &str) -> String {
    text.replace('|', "/").replace('\n', " ")
}
