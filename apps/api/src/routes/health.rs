use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Service descriptor with the public endpoint list.
pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": "resume-analyzer",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "cache_backend": state.cache.backend(),
        "endpoints": {
            "upload": "/api/upload (POST)",
            "analyze": "/api/analyze/{resume_id} (POST)",
            "get_resume": "/api/resume/{resume_id} (GET)"
        }
    }))
}

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}
