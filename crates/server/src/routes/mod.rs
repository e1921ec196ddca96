//! API route handlers
//!
//! - `health`: liveness, readiness, Prometheus metrics, metadata
//! - `catalog`: the item list the matcher ranks
//! - `matching`: vibe queries and the smoke run

pub mod catalog;
pub mod health;
pub mod matching;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info (GET /)
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Vibe Matcher",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/match",
            "/api/v1/catalog",
            "/api/v1/smoke",
            "/api/v1/metadata",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
