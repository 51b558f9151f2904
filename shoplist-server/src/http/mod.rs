//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing
//! - Graceful shutdown
//! - Plain-text error responses
//! - Server-rendered HTML for htmx

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod views;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
