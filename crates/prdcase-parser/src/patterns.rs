//! Compiled patterns shared by the parsing strategies

use once_cell::sync::Lazy;
use regex::Regex;

/// A whole cell holding a `TC-<letters>-<digits>` id
pub(crate) static TC_ID_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^TC-[A-Za-z]+-\d+$").unwrap());

/// Any `TC-<letters>-<digits>` id inside free text
pub(crate) static TC_ID_ANYWHERE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bTC-[A-Za-z]+-\d+\b").unwrap());

/// `## <Category> Test Cases`, tolerant of emphasis and spacing
pub(crate) static SECTION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^[#*\s]*(functional|negative|edge[\s_-]*case|security|ui\s*[/-]?\s*ux)\s*test\s*cases",
    )
    .unwrap()
});

/// Markdown table separator row
pub(crate) static SEPARATOR_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s|:-]*-[\s|:-]*$").unwrap());

/// `<br>`, `<br/>`, `<br />` in any case
pub(crate) static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

/// Start of a `1. ` style list item
pub(crate) static NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\s").unwrap());

/// Leading numbering or bullet marker on a step fragment. The marker must be
/// followed by whitespace or end the fragment, so `2.5 MB` and `-1` survive.
pub(crate) static STEP_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\d+[.)]|[-•*])(?:\s+|$)").unwrap());

/// Gherkin step line
pub(crate) static GHERKIN_STEP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(Given|When|Then|And|But)\s+(.+)$").unwrap());
