//! PRDCASE Core - shared types for the PRD test-case generator
//!
//! This crate provides the types that flow between prompt construction,
//! response normalization and CSV export:
//! - `TestCase` records and their closed `TestCategory` / `Priority` sets
//! - The requested `OutputFormat`
//! - Intermediate Gherkin scenario types
//! - Error types

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{
    GherkinScenario, GherkinStep, OutputFormat, Priority, StepKeyword, TestCase, TestCategory,
};
