//! Cell-level inference: category, priority and step splitting

use crate::patterns::{LINE_BREAK, NUMBERED_ITEM, STEP_MARKER};
use prdcase_core::{Priority, TestCategory};

/// Category markers checked against id text, in tie-break order
const ID_MARKERS: [(&str, TestCategory); 5] = [
    ("func", TestCategory::Functional),
    ("neg", TestCategory::Negative),
    ("edge", TestCategory::EdgeCase),
    ("sec", TestCategory::Security),
    ("ui", TestCategory::UiUx),
];

/// Category markers checked against free-form type text
const TYPE_MARKERS: [(&str, TestCategory); 7] = [
    ("func", TestCategory::Functional),
    ("neg", TestCategory::Negative),
    ("edge", TestCategory::EdgeCase),
    ("boundary", TestCategory::EdgeCase),
    ("sec", TestCategory::Security),
    ("ui", TestCategory::UiUx),
    ("ux", TestCategory::UiUx),
];

fn first_marker(text: &str, markers: &[(&str, TestCategory)]) -> Option<TestCategory> {
    let lower = text.to_lowercase();
    markers
        .iter()
        .find(|(marker, _)| lower.contains(marker))
        .map(|(_, category)| *category)
}

/// Category signalled by an id such as `TC-EDGE-007`, if any
pub fn category_from_id(id: &str) -> Option<TestCategory> {
    first_marker(id, &ID_MARKERS)
}

/// Category signalled by a `Type` cell, if any
pub fn category_from_type(type_text: &str) -> Option<TestCategory> {
    if type_text.trim().is_empty() {
        return None;
    }
    type_text
        .trim()
        .parse()
        .ok()
        .or_else(|| first_marker(type_text, &TYPE_MARKERS))
}

/// Map security/ui-ux onto the functional display category when collapsing
pub fn display_category(category: TestCategory, collapse_extended: bool) -> TestCategory {
    if collapse_extended && category.is_extended() {
        TestCategory::Functional
    } else {
        category
    }
}

/// Resolve a category from the id first, then the type text, then the
/// enclosing section. Unrecognized markers fall back to functional.
pub fn infer_category(
    id: &str,
    type_text: &str,
    section: Option<TestCategory>,
    collapse_extended: bool,
) -> TestCategory {
    let category = category_from_id(id)
        .or_else(|| category_from_type(type_text))
        .or(section)
        .unwrap_or_default();
    display_category(category, collapse_extended)
}

/// Lenient priority: substring `high` / `low`, anything else is medium
pub fn infer_priority(text: &str) -> Priority {
    let lower = text.to_lowercase();
    if lower.contains("high") {
        Priority::High
    } else if lower.contains("low") {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Split a steps cell into individual steps.
///
/// `<br>` markup wins; without it the cell is cut before each `N. ` item.
/// Numbering and bullet markers are stripped and empty fragments dropped.
pub fn split_steps(cell: &str) -> Vec<String> {
    let fragments: Vec<&str> = LINE_BREAK.split(cell).collect();
    let fragments = if fragments.len() == 1 {
        split_numbered(cell)
    } else {
        fragments
    };

    fragments
        .into_iter()
        .map(|fragment| STEP_MARKER.replace(fragment, "").trim().to_string())
        .filter(|step| !step.is_empty())
        .collect()
}

fn split_numbered(cell: &str) -> Vec<&str> {
    let starts: Vec<usize> = NUMBERED_ITEM
        .find_iter(cell)
        .map(|m| m.start())
        .filter(|&start| {
            cell[..start]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace)
        })
        .collect();

    if starts.is_empty() {
        return vec![cell];
    }

    let mut bounds = Vec::with_capacity(starts.len() + 2);
    if starts[0] != 0 {
        bounds.push(0);
    }
    bounds.extend(starts);
    bounds.push(cell.len());

    bounds
        .windows(2)
        .map(|pair| &cell[pair[0]..pair[1]])
        .collect()
}
