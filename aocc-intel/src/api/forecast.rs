//! Traffic forecast endpoints
//!
//! POST /api/forecast runs the forecast agent; GET /api/forecast/baseline
//! serves the static series the agent is anchored on.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::api::json_body;
use crate::data::{airport_data, airport_stats};
use crate::models::airport::{airport_name, is_known_code, AGGREGATE_CODE};
use crate::models::{AirportStats, DailyData, PredictionRequest, PredictionResult};
use crate::{ApiError, ApiResult, AppState};

/// Baseline series for one airport
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineResponse {
    pub airport_code: String,
    pub airport_name: String,
    pub data: &'static [DailyData],
    pub stats: &'static AirportStats,
}

/// POST /api/forecast
///
/// **Errors:**
/// - 400: malformed body, date not YYYY-MM-DD, empty airport code
/// - 502: generator failed and the baseline does not cover the date
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> ApiResult<Json<PredictionResult>> {
    let request = json_body(payload)?;

    if NaiveDate::parse_from_str(&request.date, "%Y-%m-%d").is_err() {
        return Err(ApiError::BadRequest(format!(
            "date must be YYYY-MM-DD, got '{}'",
            request.date
        )));
    }
    if request.airport_code.trim().is_empty() {
        return Err(ApiError::BadRequest("airportCode is required".to_string()));
    }

    info!(
        date = %request.date,
        airport = %request.airport_code,
        scenario = request.scenario.as_deref().unwrap_or("-"),
        "Forecast requested"
    );

    match state.forecast.predict(&request).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            state.record_error(format!("forecast: {}", e)).await;
            Err(e.into())
        }
    }
}

/// GET /api/forecast/baseline/:airport
///
/// `ALL` or any known airport code; codes other than CGK and DPS get the
/// aggregate series.
pub async fn baseline(Path(airport): Path<String>) -> ApiResult<Json<BaselineResponse>> {
    let code = airport.trim().to_uppercase();
    if code != AGGREGATE_CODE && !is_known_code(&code) {
        return Err(ApiError::NotFound(format!("Unknown airport code '{}'", airport)));
    }

    Ok(Json(BaselineResponse {
        airport_name: airport_name(&code).to_string(),
        data: airport_data(&code),
        stats: airport_stats(&code),
        airport_code: code,
    }))
}

/// Build forecast routes
pub fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/api/forecast", post(predict))
        .route("/api/forecast/baseline/:airport", get(baseline))
}
