//! Web layer for the notification endpoint.
//!
//! This module provides:
//! - The request pipeline shared by every host ([`handle`])
//! - A serverless adapter ([`handle_event`])
//! - Axum handlers and the application router

pub mod envelope;
pub mod handlers;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

pub use envelope::{ErrorBody, ResponseEnvelope, SuccessBody};
pub use handlers::{
    handle, handle_event, handle_event_with, health, send_email, AppState, HealthResponse,
    HttpEvent, TransportSource,
};

/// Build the application router.
///
/// The notification endpoint accepts every method itself so that OPTIONS and
/// 405 responses come from the same pipeline as POST.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", any(send_email))
        .route("/send-email", any(send_email))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
