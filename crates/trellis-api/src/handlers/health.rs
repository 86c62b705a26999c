//! Health check handlers for service monitoring.
//!
//! The relay holds no connections at rest, so the probes report process
//! health only; downstream providers are exercised per-request.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::AppState;

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service health status
    pub status: &'static str,
    /// Timestamp when the health check was performed
    pub timestamp: DateTime<Utc>,
    /// Service version information
    pub version: String,
}

/// Health check endpoint handler.
///
/// Designed to be called frequently by orchestration systems and load
/// balancers, so it avoids expensive operations.
#[instrument(name = "health_check", skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Response {
    debug!("Performing health check");

    let response = HealthResponse {
        status: "healthy",
        timestamp: state.clock.now_utc(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Liveness check endpoint for orchestration probes.
///
/// Returns a minimal response indicating the server process is alive.
#[instrument(name = "liveness_check", skip(state))]
pub async fn liveness_check(State(state): State<AppState>) -> Response {
    debug!("Performing liveness check");

    let response = serde_json::json!({
        "status": "alive",
        "timestamp": state.clock.now_utc(),
        "service": "trellis-api",
    });

    (StatusCode::OK, Json(response)).into_response()
}
