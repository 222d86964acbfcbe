use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use super::AppState;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "plan-advisor",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
/// Ready once a plan catalog is held in memory
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.current() {
        Some(catalog) => (StatusCode::OK, Json(json!({
            "status": "ready",
            "service": "plan-advisor",
            "plans": catalog.len(),
        }))),
        None => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({
            "status": "not_ready",
            "service": "plan-advisor",
            "reason": "plan catalog not loaded",
        }))),
    }
}
