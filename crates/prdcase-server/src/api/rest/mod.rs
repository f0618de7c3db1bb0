//! REST API implementation
//!
//! Modular REST API with clean separation of concerns:
//! - types: Request/response type definitions and shared state
//! - extractors: Custom request extractors
//! - handlers: API endpoint handlers
//! - router: Router creation and configuration
//! - tests: Unit tests for all components

mod extractors;
mod handlers;
mod router;
pub mod types;

// Re-export public API
pub use extractors::{ClientKey, JsonExtractor, ACCESS_PASSWORD_HEADER};
pub use router::create_router;
pub use types::{AppState, GenerateRequest, GenerateResponse, GenerationMetadata, HealthResponse};
