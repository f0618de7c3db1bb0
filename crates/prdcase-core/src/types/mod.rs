//! Type definitions for generated test suites
//!
//! - `test_case`: the canonical output unit and its enumerations
//! - `format`: requested LLM output shape
//! - `gherkin`: intermediate scenario parse units

pub mod format;
pub mod gherkin;
pub mod test_case;

pub use format::OutputFormat;
pub use gherkin::{GherkinScenario, GherkinStep, StepKeyword};
pub use test_case::{Priority, TestCase, TestCategory};
