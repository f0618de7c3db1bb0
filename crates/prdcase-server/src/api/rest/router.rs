//! Router creation and configuration
//!
//! Creates the Axum router for the REST API endpoints.

use super::handlers::*;
use super::types::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create REST API router. `body_limit` caps request bodies in bytes.
pub fn create_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/generate", post(generate))
        .route("/api/generate/csv", post(generate_csv))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
