//! Executive report endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use crate::api::{json_body, optional_json_body, HtmlResponse};
use crate::data::executive_snapshot;
use crate::models::ExecutiveData;
use crate::{ApiError, ApiResult, AppState};

/// GET /api/executive
pub async fn get_snapshot() -> Json<ExecutiveData> {
    Json(executive_snapshot())
}

/// POST /api/executive/analysis
///
/// Analyses the posted snapshot, or the built-in one when no body is sent.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<ExecutiveData>, JsonRejection>,
) -> ApiResult<Json<HtmlResponse>> {
    let data = optional_json_body(payload)?.unwrap_or_else(executive_snapshot);
    let html = state.reporter.analyze(&data).await;
    Ok(Json(HtmlResponse { html }))
}

/// POST /api/executive/audio
///
/// **Request:** `{"html": "..."}`
/// **Response:** `audio/wav`, or 204 when the generator returned no audio
pub async fn narrate(
    State(state): State<AppState>,
    payload: Result<Json<HtmlResponse>, JsonRejection>,
) -> ApiResult<Response> {
    let report = json_body(payload)?;
    if report.html.trim().is_empty() {
        return Err(ApiError::BadRequest("html is required".to_string()));
    }

    let audio = match state.reporter.narrate(&report.html).await {
        Ok(audio) => audio,
        Err(e) => {
            state.record_error(format!("narration: {}", e)).await;
            return Err(e.into());
        }
    };

    let Some(audio) = audio else {
        info!("Narration returned no audio");
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let wav = audio
        .to_wav_bytes()
        .map_err(|e| ApiError::Internal(format!("Failed to encode WAV: {}", e)))?;

    Ok(([(header::CONTENT_TYPE, "audio/wav")], wav).into_response())
}

/// Build executive routes
pub fn executive_routes() -> Router<AppState> {
    Router::new()
        .route("/api/executive", get(get_snapshot))
        .route("/api/executive/analysis", post(analyze))
        .route("/api/executive/audio", post(narrate))
}
