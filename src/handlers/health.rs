//! Liveness and readiness probes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use super::AppState;

const SERVICE: &str = "product-lens";

/// GET /health
///
/// Answers as long as the process is serving requests. Does not touch the
/// database or the completion endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": SERVICE,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /ready
///
/// 503 until the product database answers a ping. The completion endpoint is
/// not probed; it is only reached when an image is analyzed.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let model = state.analyzer.model().to_string();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "service": SERVICE, "model": model })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Product store did not answer readiness ping");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "service": SERVICE, "model": model })),
            )
        }
    }
}
