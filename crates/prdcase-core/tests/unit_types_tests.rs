//! Unit tests for shared test-suite types
//!
//! Covers category/format parsing and the TestCase display invariants.

use prdcase_core::*;

// =============================================================================
// Category Tests
// =============================================================================

#[test]
fn test_all_categories_round_trip_wire_names() -> anyhow::Result<()> {
    for category in TestCategory::ALL {
        let parsed: TestCategory = category.as_str().parse()?;
        assert_eq!(parsed, category);
    }
    Ok(())
}

#[test]
fn test_display_names_parse_back() -> anyhow::Result<()> {
    for category in TestCategory::ALL {
        let parsed: TestCategory = category.display_name().parse()?;
        assert_eq!(parsed, category);
    }
    Ok(())
}

#[test]
fn test_id_prefixes_parse_back() -> anyhow::Result<()> {
    for category in TestCategory::ALL {
        let parsed: TestCategory = category.id_prefix().parse()?;
        assert_eq!(parsed, category);
    }
    Ok(())
}

#[test]
fn test_extended_categories() {
    assert!(TestCategory::Security.is_extended());
    assert!(TestCategory::UiUx.is_extended());
    assert!(!TestCategory::Functional.is_extended());
    assert!(!TestCategory::DEFAULT_REQUESTED.iter().any(|c| c.is_extended()));
}

// =============================================================================
// TestCase Tests
// =============================================================================

#[test]
fn test_builder_sets_fields() {
    let tc = TestCase::new("TC-EDGE-007", "Maximum length username")
        .with_category(TestCategory::EdgeCase)
        .with_steps(vec!["Enter 255 characters", "Submit"])
        .with_expected_result("Username is accepted")
        .with_priority(Priority::Low);

    assert_eq!(tc.category, TestCategory::EdgeCase);
    assert_eq!(tc.steps.len(), 2);
    assert_eq!(tc.priority, Priority::Low);
    assert!(tc.is_complete());
}

#[test]
fn test_new_case_is_incomplete_until_filled() {
    let tc = TestCase::new("TC-FUNC-001", "Login");
    assert!(!tc.is_complete());
    assert!(tc.fill_placeholders(1).is_complete());
}

#[test]
fn test_json_round_trip() -> anyhow::Result<()> {
    let tc = TestCase::new("TC-SEC-001", "SQL injection in login")
        .with_category(TestCategory::Security)
        .with_steps(vec!["Enter ' OR 1=1 --"])
        .with_expected_result("Login rejected")
        .with_priority(Priority::High);

    let json = serde_json::to_string(&tc)?;
    let back: TestCase = serde_json::from_str(&json)?;
    assert_eq!(back, tc);
    Ok(())
}

// =============================================================================
// Gherkin Type Tests
// =============================================================================

#[test]
fn test_scenario_outcomes() {
    let mut scenario = GherkinScenario::new("Successful login");
    scenario.steps.push(GherkinStep::new(StepKeyword::Given, "a registered user"));
    scenario.steps.push(GherkinStep::new(StepKeyword::Then, "the dashboard is shown"));
    scenario.steps.push(GherkinStep::new(StepKeyword::And, "a welcome banner appears"));

    let outcomes: Vec<&str> = scenario.outcomes().collect();
    assert_eq!(outcomes, vec!["the dashboard is shown"]);
    assert_eq!(scenario.steps[0].to_string(), "Given a registered user");
}

#[test]
fn test_step_keyword_is_case_sensitive() {
    assert!("Given".parse::<StepKeyword>().is_ok());
    assert!("given".parse::<StepKeyword>().is_err());
}
