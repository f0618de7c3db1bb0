//! API endpoint handlers
//!
//! HTTP request handlers for all REST API endpoints.

use super::extractors::{ClientKey, JsonExtractor, ACCESS_PASSWORD_HEADER};
use super::types::*;
use crate::error::ServerError;
use crate::ingest::{ingest, Document};
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use prdcase_core::OutputFormat;
use prdcase_llm::{parse_categories, GenerationOutcome};
use prdcase_parser::export_file_name;
use tracing::{error, info, warn};

/// Shown next to the raw reply when nothing could be parsed
pub const RAW_OUTPUT_NOTICE: &str = "Could not parse test cases, showing raw output";

/// Health check endpoint
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let ollama = match &state.ollama {
        Some((provider, model)) => Some(provider.health(model).await),
        None => None,
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ai_provider: state.generator.provider_name().to_string(),
        ollama,
    })
}

/// Generation endpoint returning JSON
#[axum::debug_handler]
pub(super) async fn generate(
    State(state): State<AppState>,
    client: ClientKey,
    headers: HeaderMap,
    JsonExtractor(payload): JsonExtractor<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ServerError> {
    let (document, outcome) = run_generation(&state, &client, &headers, payload).await?;

    let extracted_length = document.extracted_length();
    let notice = outcome
        .should_show_raw()
        .then(|| RAW_OUTPUT_NOTICE.to_string());

    Ok(Json(GenerateResponse {
        success: true,
        cases: outcome.test_cases,
        parsed: outcome.parsed,
        strategy: outcome.strategy,
        format: outcome.format,
        notice,
        metadata: GenerationMetadata {
            file_name: document.file_name,
            file_size: document.file_size,
            extracted_length,
            ai_provider: outcome.provider,
            model: outcome.model,
            tokens_used: outcome.tokens_used,
            truncated: outcome.truncated,
        },
        test_cases: outcome.raw_text,
    }))
}

/// Generation endpoint returning a CSV download
#[axum::debug_handler]
pub(super) async fn generate_csv(
    State(state): State<AppState>,
    client: ClientKey,
    headers: HeaderMap,
    JsonExtractor(payload): JsonExtractor<GenerateRequest>,
) -> Result<Response, ServerError> {
    let (document, outcome) = run_generation(&state, &client, &headers, payload).await?;

    let csv = state.generator.to_csv(&outcome)?;
    let file_name = export_file_name(&document.file_name, Utc::now());
    info!(
        "exporting {} test case(s) as {}",
        outcome.test_cases.len(),
        file_name
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Password gate, rate limit, ingestion and the LLM call shared by both
/// generation endpoints
async fn run_generation(
    state: &AppState,
    client: &ClientKey,
    headers: &HeaderMap,
    payload: GenerateRequest,
) -> Result<(Document, GenerationOutcome), ServerError> {
    authorize(state, headers)?;

    if let Err(retry_after) = state.rate_limiter.check(&client.0) {
        warn!("rate limit exceeded for {}", client.0);
        return Err(ServerError::RateLimited {
            retry_after_secs: retry_after.as_secs().max(1),
        });
    }

    let format = parse_format(payload.format.as_deref())?;
    let categories = payload
        .scenario_types
        .as_deref()
        .map(parse_categories)
        .unwrap_or_default();

    let document = ingest(
        payload.file.as_deref(),
        payload.content.as_deref(),
        payload.file_name.as_deref(),
        state.max_document_bytes,
    )?;

    info!(
        "Received generation request: file={}, {} bytes, format={}, {} categories",
        document.file_name,
        document.file_size,
        format,
        categories.len()
    );

    let outcome = state
        .generator
        .generate(&document.text, format, &categories)
        .await
        .map_err(|e| {
            error!("Error generating test cases: {}", e);
            ServerError::from(e)
        })?;

    Ok((document, outcome))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ServerError> {
    let Some(expected) = &state.access_password else {
        return Ok(());
    };

    let supplied = headers
        .get(ACCESS_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok());

    match supplied {
        Some(password) if password == expected => Ok(()),
        Some(_) => Err(ServerError::Unauthorized("invalid access password".to_string())),
        None => Err(ServerError::Unauthorized(format!(
            "missing {} header",
            ACCESS_PASSWORD_HEADER
        ))),
    }
}

pub(super) fn parse_format(format: Option<&str>) -> Result<OutputFormat, ServerError> {
    match format.map(str::trim).filter(|f| !f.is_empty()) {
        None => Ok(OutputFormat::default()),
        Some(name) => name
            .parse()
            .map_err(|e| ServerError::InvalidRequest(format!("{}", e))),
    }
}
