//! CSV export of normalized test cases
//!
//! Every export is produced from structured `TestCase` data: raw replies are
//! normalized first, so the CSV always agrees with what is displayed.

use crate::error::{ParseError, Result};
use crate::normalizer::ResponseNormalizer;
use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use prdcase_core::{OutputFormat, TestCase};
use std::path::Path;

/// Header for table-shaped exports
pub const TABLE_CSV_HEADER: [&str; 6] = ["ID", "Title", "Type", "Steps", "Expected Result", "Priority"];

/// Header for Gherkin-shaped exports
pub const GHERKIN_CSV_HEADER: [&str; 5] = ["ID", "Title", "Steps", "Expected Result", "Priority"];

/// CSV serializer
#[derive(Debug, Clone, Default)]
pub struct CsvSerializer {
    normalizer: ResponseNormalizer,
}

impl CsvSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific normalizer for `serialize_raw`
    pub fn with_normalizer(normalizer: ResponseNormalizer) -> Self {
        Self { normalizer }
    }

    /// Serialize cases. Every field is double-quoted with inner quotes
    /// doubled; records end with `\n`; exactly one header row is written.
    pub fn serialize(&self, cases: &[TestCase], format: OutputFormat) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        match format {
            OutputFormat::Table => {
                writer.write_record(TABLE_CSV_HEADER)?;
                for case in cases {
                    writer.write_record([
                        case.id.as_str(),
                        case.title.as_str(),
                        case.category.display_name(),
                        case.steps.join("; ").as_str(),
                        case.expected_result.as_str(),
                        case.priority.as_str(),
                    ])?;
                }
            }
            OutputFormat::Gherkin => {
                writer.write_record(GHERKIN_CSV_HEADER)?;
                for case in cases {
                    writer.write_record([
                        case.id.as_str(),
                        case.title.as_str(),
                        case.steps.join(" | ").as_str(),
                        case.expected_result.as_str(),
                        case.priority.as_str(),
                    ])?;
                }
            }
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ParseError::CsvWriteError(e.to_string()))?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Normalize a raw reply, then serialize the recovered cases
    pub fn serialize_raw(&self, raw: &str, format: OutputFormat) -> Result<String> {
        let cases = self.normalizer.normalize(raw, format);
        self.serialize(&cases, format)
    }
}

/// Download name: `<source-stem>-test-cases-<unix-millis>.csv`
pub fn export_file_name(source_name: &str, at: DateTime<Utc>) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let sanitized: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let sanitized = sanitized.trim_matches('-');

    let stem = if sanitized.is_empty() {
        "document"
    } else {
        sanitized
    };

    format!("{}-test-cases-{}.csv", stem, at.timestamp_millis())
}
