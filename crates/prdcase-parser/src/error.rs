//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// Input was empty or whitespace-only where content is required
    #[error("Content cannot be empty")]
    EmptyInput,

    /// CSV encoding failed
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// CSV buffer could not be flushed
    #[error("CSV write error: {0}")]
    CsvWriteError(String),

    /// CSV output was not valid UTF-8
    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
