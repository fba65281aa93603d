//! HTTP API handlers for aocc-intel
//!
//! JSON over HTTP for the operations dashboard. Errors use the
//! `{"error": {"code", "message"}}` body from [`crate::ApiError`].

pub mod events;
pub mod executive;
pub mod forecast;
pub mod health;

pub use events::event_routes;
pub use executive::executive_routes;
pub use forecast::forecast_routes;
pub use health::health_routes;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Generated HTML fragment, in requests and responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlResponse {
    pub html: String,
}

/// Unwrap a JSON body, turning rejections into a 400 with the JSON error body
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Like [`json_body`], but a request sent without a JSON body yields `None`
///
/// Any other rejection (bad syntax, wrong field types) is still a 400.
pub(crate) fn optional_json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Option<T>, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(Some(value)),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(None),
        Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
    }
}
