//! PRDCASE HTTP Server Library
//!
//! Provides the REST API components for testing and reuse.

pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod rate_limit;
