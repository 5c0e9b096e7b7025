//! Hello-world HTTP service.
//!
//! Endpoints:
//! - GET /             - Greeting
//! - GET /repeat       - Echo the `input` query parameter
//! - GET /health       - Health check
//! - GET /healthcheck  - Same as /health

mod handlers;

use axum::{routing::get, Router};

pub use handlers::{EchoResponse, MessageResponse};

pub fn create_app() -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route("/repeat", get(handlers::repeat))
        .route("/health", get(handlers::health))
        .route("/healthcheck", get(handlers::health))
}
