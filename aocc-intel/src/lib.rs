//! aocc-intel library interface
//!
//! Exposes the sanitization pipeline, generator-backed services and the HTTP
//! router for integration testing.

pub mod api;
pub mod data;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::{EventScanner, ExecutiveReporter, ForecastAgent, TextGenerator};

/// Application state shared across handlers
///
/// Holds no scan results: every request produces an independent answer.
#[derive(Clone)]
pub struct AppState {
    pub forecast: Arc<ForecastAgent>,
    pub scanner: Arc<EventScanner>,
    pub reporter: Arc<ExecutiveReporter>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last upstream error, reported by /health
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            forecast: Arc::new(ForecastAgent::new(generator.clone())),
            scanner: Arc::new(EventScanner::new(generator.clone())),
            reporter: Arc::new(ExecutiveReporter::new(generator)),
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn record_error(&self, message: impl Into<String>) {
        *self.last_error.write().await = Some(message.into());
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::forecast_routes())
        .merge(api::event_routes())
        .merge(api::executive_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
