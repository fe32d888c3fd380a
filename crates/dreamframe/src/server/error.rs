//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use dreamframe_core::{DreamError, ValidationError};
use serde_json::json;

/// An error returned from an API handler.
#[derive(Debug)]
pub enum ApiError {
    /// The body failed validation; reported field by field.
    Validation(ValidationError),
    /// Generation failed; the message is passed through.
    Service(String),
}

impl From<DreamError> for ApiError {
    fn from(err: DreamError) -> Self {
        match err {
            DreamError::Validation(v) => ApiError::Validation(v),
            DreamError::Service(e) => ApiError::Service(e.to_string()),
            other => ApiError::Service(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(v) => {
                tracing::debug!("Rejected request: {v}");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": v.flatten() })),
                )
                    .into_response()
            }
            ApiError::Service(message) => {
                tracing::error!("Generation failed: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}
