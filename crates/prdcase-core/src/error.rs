//! Error types for PRDCASE Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown test category: {0}")]
    UnknownCategory(String),

    #[error("Unknown output format: {0} (expected 'table' or 'gherkin')")]
    UnknownFormat(String),

    #[error("Unknown priority: {0}")]
    UnknownPriority(String),

    #[error("Unknown Gherkin keyword: {0}")]
    UnknownKeyword(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
