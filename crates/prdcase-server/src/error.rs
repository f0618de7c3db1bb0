//! Server error types

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use prdcase_llm::LLMError;
use serde_json::json;
use std::fmt;

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// Invalid request
    InvalidRequest(String),

    /// Missing or wrong access password
    Unauthorized(String),

    /// Document type the server cannot read
    UnsupportedMedia(String),

    /// Too many requests from one client
    RateLimited { retry_after_secs: u64 },

    /// The LLM backend failed
    GenerationFailed(String),

    /// Internal server error
    InternalError(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServerError::UnsupportedMedia(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ServerError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ServerError::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
            ServerError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ServerError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ServerError::UnsupportedMedia(msg) => write!(f, "Unsupported media type: {}", msg),
            ServerError::RateLimited { retry_after_secs } => write!(
                f,
                "Rate limit exceeded, retry in {} seconds",
                retry_after_secs
            ),
            ServerError::GenerationFailed(msg) => {
                write!(f, "Failed to generate test cases: {}", msg)
            }
            ServerError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let retry_after = match &self {
            ServerError::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        match retry_after {
            Some(secs) => (status, [(header::RETRY_AFTER, secs.to_string())], body).into_response(),
            None => (status, body).into_response(),
        }
    }
}

impl From<LLMError> for ServerError {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::InvalidConfiguration(msg) => ServerError::InvalidRequest(msg),
            LLMError::ExportFailed(e) => ServerError::InternalError(e.to_string()),
            other => ServerError::GenerationFailed(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}
