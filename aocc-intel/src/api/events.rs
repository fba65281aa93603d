//! Event intelligence endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use crate::api::{json_body, optional_json_body, HtmlResponse};
use crate::models::EventRecord;
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    /// YYYY-MM-DD; today (UTC) when absent
    #[serde(default)]
    pub start_date: Option<String>,
}

/// POST /api/events/scan
///
/// **Request:** `{"startDate": "2025-12-20"}`, `{}` or no body
/// **Response:** sanitized event list; empty when the generator fails
pub async fn scan_events(
    State(state): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<EventRecord>>> {
    let request = optional_json_body(payload)?.unwrap_or_default();

    let start = match request.start_date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => {
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                ApiError::BadRequest(format!("startDate must be YYYY-MM-DD, got '{}'", date))
            })?
        }
        _ => Utc::now().date_naive(),
    };

    info!(start = %start, "Event scan requested");
    Ok(Json(state.scanner.scan(start).await))
}

/// POST /api/events/summary
///
/// **Request:** event list as returned by the scan
/// **Response:** `{"html": "..."}`
pub async fn summarize_events(
    State(state): State<AppState>,
    payload: Result<Json<Vec<EventRecord>>, JsonRejection>,
) -> ApiResult<Json<HtmlResponse>> {
    let events = json_body(payload)?;
    let html = state.reporter.summarize_events(&events).await;
    Ok(Json(HtmlResponse { html }))
}

/// Build event routes
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/api/events/scan", post(scan_events))
        .route("/api/events/summary", post(summarize_events))
}
