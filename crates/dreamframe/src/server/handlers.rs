//! Route handlers.

use super::error::ApiError;
use super::AppState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::Json;
use dreamframe_core::{GenerationResponse, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `POST /api/generate`
///
/// The body is parsed by hand so that malformed JSON is reported as a
/// form error in the same shape as any other validation failure.
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerationResponse>, ApiError> {
    let value = serde_json::from_slice::<Value>(&body)
        .map_err(|e| ApiError::Validation(ValidationError::invalid_json(&e)))?;
    let response = state.generator.generate_from_json(&value).await?;
    Ok(Json(response))
}

/// Query string of a shareable generation link.
#[derive(Debug, Deserialize)]
pub struct ShareQuery {
    pub q: Option<String>,
    pub n: Option<String>,
    pub s: Option<String>,
    pub style: Option<String>,
}

impl ShareQuery {
    /// Map the short query keys onto a request body.
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        if let Some(q) = &self.q {
            body.insert("prompt".into(), Value::String(q.clone()));
        }
        if let Some(n) = &self.n {
            let count = n
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(n.clone()));
            body.insert("count".into(), count);
        }
        if let Some(s) = &self.s {
            body.insert("size".into(), Value::String(s.clone()));
        }
        if let Some(style) = &self.style {
            body.insert("style".into(), Value::String(style.clone()));
        }
        Value::Object(body)
    }
}

/// `GET /api/generate?q=&n=&s=&style=`
pub async fn share(
    State(state): State<AppState>,
    Query(query): Query<ShareQuery>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let response = state.generator.generate_from_json(&query.to_body()).await?;
    Ok(Json(response))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub primary_available: bool,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: dreamframe_core::VERSION,
        primary_available: state.generator.primary_available(),
    })
}
