pub mod health;

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::analysis::handlers::handle_analyze;
use crate::envelope::ResponseEnvelope;
use crate::review::handlers::{handle_index, handle_review_upload};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/analyze", post(handle_analyze))
        .route("/api/analyze-cv", post(handle_analyze))
        // Review page
        .route("/", get(handle_index))
        .route("/review", post(handle_review_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(panic_envelope))
        .with_state(state)
}

/// Turns a handler panic into the standard failure envelope.
fn panic_envelope(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!("Handler panicked: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ResponseEnvelope::failure_message("Internal server error", None)),
    )
        .into_response()
}
