use crate::error::ServerResult;
use crate::metrics::render as render_metrics;
use crate::state::{EngineState, ServerMetadata, ServerState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;
use vibematcher::FATAL_LOAD_MESSAGE;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Liveness: 200 whenever the process is serving, even if the matcher failed to load.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "vibematcher-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness: 200 once the catalog vectors are built, 503 if startup failed.
pub async fn readiness_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    match &state.engine {
        EngineState::Ready(matcher) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "service": "vibematcher-server",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "uptime_seconds": uptime_seconds(),
                "components": {
                    "api": "ready",
                    "model": matcher.model_name(),
                    "catalog_items": matcher.catalog().len(),
                    "vectors_built": matcher.is_built(),
                }
            })),
        ),
        EngineState::Failed(reason) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unavailable",
                "service": "vibematcher-server",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "message": FATAL_LOAD_MESSAGE,
                "reason": reason,
            })),
        ),
    }
}

/// Prometheus metrics endpoint
pub async fn metrics(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    if !state.config.metrics_enabled {
        return (StatusCode::NOT_FOUND, "metrics disabled\n".to_string()).into_response();
    }
    let body = render_metrics().unwrap_or_default();
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response()
}

/// Server metadata endpoint
pub async fn server_metadata(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let matcher = state.matcher()?;

    Ok(Json(ServerMetadata {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime_seconds(),
        model: matcher.model_name().to_string(),
        catalog_items: matcher.catalog().len(),
    }))
}
