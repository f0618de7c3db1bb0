//! Document ingestion
//!
//! Documents arrive either as plain text or as a base64 `data:` URL. Text
//! and markdown are decoded as UTF-8; PDF extraction is not available in
//! this server and is rejected.

use crate::error::ServerError;
use base64::Engine;

/// Name used when the client sends none
pub const DEFAULT_FILE_NAME: &str = "uploaded-file";

/// A decoded document ready for prompting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub file_name: String,
    /// Size in bytes as received (decoded file bytes or text length)
    pub file_size: usize,
}

impl Document {
    /// Length of the extracted text in characters
    pub fn extracted_length(&self) -> usize {
        self.text.chars().count()
    }
}

/// Build a document from an optional data URL or inline text. The data URL
/// wins when both are present.
pub fn ingest(
    file: Option<&str>,
    content: Option<&str>,
    file_name: Option<&str>,
    max_bytes: usize,
) -> Result<Document, ServerError> {
    let file_name = file_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_FILE_NAME)
        .to_string();

    if let Some(url) = file.filter(|f| !f.trim().is_empty()) {
        let (mime, bytes) = decode_data_url(url)?;
        check_size(bytes.len(), max_bytes)?;
        if !is_text_mime(&mime) {
            return Err(ServerError::UnsupportedMedia(format!(
                "cannot extract text from {}",
                mime
            )));
        }
        return Ok(Document {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            file_name,
            file_size: bytes.len(),
        });
    }

    if let Some(text) = content.filter(|c| !c.is_empty()) {
        check_size(text.len(), max_bytes)?;
        return Ok(Document {
            text: text.to_string(),
            file_name,
            file_size: text.len(),
        });
    }

    Err(ServerError::InvalidRequest(
        "No file or content provided".to_string(),
    ))
}

/// Split a `data:<mime>;base64,<payload>` URL into its MIME type (lowercase,
/// possibly empty) and decoded bytes
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), ServerError> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| ServerError::InvalidRequest("file must be a data: URL".to_string()))?;

    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| ServerError::InvalidRequest("malformed data URL".to_string()))?;

    let mut params = meta.split(';');
    let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(ServerError::InvalidRequest(
            "data URL must be base64-encoded".to_string(),
        ));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| ServerError::InvalidRequest(format!("invalid base64 payload: {}", e)))?;

    Ok((mime, bytes))
}

fn is_text_mime(mime: &str) -> bool {
    mime.is_empty() || mime.starts_with("text/")
}

fn check_size(size: usize, max_bytes: usize) -> Result<(), ServerError> {
    if size > max_bytes {
        return Err(ServerError::InvalidRequest(format!(
            "document is {} bytes, limit is {} bytes",
            size, max_bytes
        )));
    }
    Ok(())
}
