//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing (one span per request, W3C trace context with `otel`)
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod trace;

pub use error::ApiError;
pub use server::{build_router, run_server, shutdown_signal};
