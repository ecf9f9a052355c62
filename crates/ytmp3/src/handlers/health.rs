use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::server::AppState;

/// Handler for /health endpoint
///
/// Returns a simple health check response with uptime
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let body = json!({
        "status": "healthy",
        "service": "ytmp3",
        "engine": state.engine.name(),
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.started_at.elapsed().as_secs(),
    });

    (StatusCode::OK, Json(body))
}

/// Handler for /metrics endpoint
///
/// Returns Prometheus metrics in text exposition format
pub async fn metrics() -> Response {
    match ytmp3core::metrics::render() {
        Ok((content_type, body)) => ([(header::CONTENT_TYPE, content_type)], body).into_response(),
        Err(e) => {
            log::error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to encode metrics: {}", e)).into_response()
        }
    }
}
