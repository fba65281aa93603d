//! Liveness for the dashboard and process supervisors
//!
//! The service is "degraded" once a generator call has failed and the
//! failure is still the most recent one recorded in [`AppState`].

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

const STATUS_OK: &str = "ok";
const STATUS_DEGRADED: &str = "degraded";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" after an upstream failure
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
    pub uptime_seconds: u64,
    /// Most recent forecast or narration failure, prefixed with its operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_seconds = Utc::now()
        .signed_duration_since(state.startup_time)
        .num_seconds()
        .max(0) as u64;
    let last_error = state.last_error.read().await.clone();

    Json(HealthResponse {
        status: if last_error.is_some() { STATUS_DEGRADED } else { STATUS_OK },
        module: "aocc-intel",
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("GIT_HASH"),
        build_timestamp: env!("BUILD_TIMESTAMP"),
        build_profile: env!("BUILD_PROFILE"),
        uptime_seconds,
        last_error,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
