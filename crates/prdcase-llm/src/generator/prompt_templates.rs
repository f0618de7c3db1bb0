//! Prompt templates for test-suite generation
//!
//! The column list and id convention here are the wire contract the table
//! parser in `prdcase-parser` relies on. Keep them in sync.

/// Column header every table section must use
pub const TABLE_COLUMNS: &str = "| ID | Title | Type | Steps | Expected Result | Priority |";

/// System message framing the model as a senior test engineer
pub const SYSTEM_PROMPT: &str = r#"You are a Principal SDET with 20+ years of experience. Your task is to analyze Product Requirement Documents (PRDs) and generate a comprehensive Test Suite.

### Output Requirements:
1. **Grouping:** Group test cases by Type (Functional, Negative, Edge Case, Security, UI/UX).
2. **Priority:** Assign High/Medium/Low based on business risk and impact.
3. **Format:** Use Markdown Tables for each group with these exact columns, in this order:
   | ID | Title | Type | Steps | Expected Result | Priority |
4. **Detail Level:**
   - Use numbered lists within the "Steps" column, separating steps with <br>.
   - "Expected Result" must be assertive (e.g., "Verify...", "System must...", "User should...").
   - Include TC-IDs following the naming convention `TC-[Category]-[Number]` with a zero-padded 3-digit number (e.g., TC-FUNC-001, TC-NEG-001, TC-EDGE-001, TC-SEC-001, TC-UI-001).

### Test Case Categories and Volume:
- **FUNCTIONAL (5-10 cases):** Verify core functionality works as specified in the PRD
- **NEGATIVE (3-7 cases):** Verify proper error handling, validation, and rejection of invalid inputs
- **EDGE CASE (3-7 cases):** Test boundary conditions, maximum/minimum values, and unusual but valid inputs
- **SECURITY (2-5 cases):** Test authentication, authorization, data protection, and security vulnerabilities
- **UI/UX (2-5 cases):** Test user interface elements, accessibility, responsiveness, and user experience flows

### Formatting Rules:
- Each test case must be complete and executable
- Expected results must be specific and measurable
- Priority should reflect business risk (High = critical path, Medium = important features, Low = nice-to-have)"#;

/// Format instructions for the markdown table shape
pub const TABLE_FORMAT_INSTRUCTIONS: &str = r###"Format the output as Markdown tables grouped by Type. Each group must start with a header like "## Functional Test Cases" followed by a table with the columns: | ID | Title | Type | Steps | Expected Result | Priority |. Put a separator row (|----|...) directly under the column header. Write the Steps as a numbered list separated by <br> inside the cell."###;

/// Format instructions for the Gherkin shape
pub const GHERKIN_FORMAT_INSTRUCTIONS: &str = r#"Format the output as Gherkin (BDD) scenarios with Given-When-Then syntax. Use Feature and Scenario blocks with Given, When, Then, And, But steps, one step per line. Group scenarios by type (Functional, Negative, Edge Case, Security, UI/UX). Tag every scenario on the line above it with its TC-ID, its type and its priority, e.g. "@TC-FUNC-001 @functional @high"."#;

/// Closing requirements for the table shape
pub const TABLE_REQUIREMENTS: &str = r#"### Critical Requirements:
- Generate test cases organized by Type (Functional, Negative, Edge Case, Security, UI/UX)
- Use Markdown table format with exact columns: | ID | Title | Type | Steps | Expected Result | Priority |
- TC-IDs must follow convention: TC-[Category]-[Number]
- Expected Results must be assertive and specific
- Priority should reflect business risk (High/Medium/Low)
- Ensure comprehensive coverage of all PRD requirements"#;

/// Closing requirements for the Gherkin shape
pub const GHERKIN_REQUIREMENTS: &str = r#"### Critical Requirements:
- Generate scenarios organized by Type (Functional, Negative, Edge Case, Security, UI/UX)
- Every scenario starts with "Scenario:" and is preceded by its tags
- TC-IDs must follow convention: TC-[Category]-[Number]
- Every scenario must contain at least one Then step stating the expected result
- Priority tags should reflect business risk (@high/@medium/@low)
- Ensure comprehensive coverage of all PRD requirements"#;

/// User prompt. `{document}` is substituted last so document text can never
/// be mistaken for a placeholder.
pub const USER_PROMPT_TEMPLATE: &str = r#"Analyze the following PRD and generate a comprehensive Test Suite:

{document}

{format_instructions}

{category_instructions}

{requirements}"#;
