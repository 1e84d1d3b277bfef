pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

/// Headroom above the document limit for multipart framing, so oversized
/// documents reach the handler and get a structured error.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/upload", post(handlers::handle_upload))
        .route("/api/analyze/:resume_id", post(handlers::handle_analyze))
        .route("/api/resume/:resume_id", get(handlers::handle_get_resume))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
