use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use studyhall_core::error::Error;
use studyhall_core::traits::Answerer;
use studyhall_core::types::{AnswerResult, DEFAULT_SUBJECT};

use crate::server::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Default, PartialEq, Eq)]
pub struct AskRequest {
    pub question: Option<String>,
    pub subject: Option<String>,
    pub top_k: Option<usize>,
}

impl AskRequest {
    /// Decode a request body field by field. A body that is not a JSON
    /// object counts as empty; a field of the wrong type counts as absent,
    /// so one bad field never discards the others.
    pub fn from_body(body: &[u8]) -> Self {
        let Ok(serde_json::Value::Object(fields)) = serde_json::from_slice::<serde_json::Value>(body) else {
            return Self::default();
        };
        let text = |key: &str| fields.get(key).and_then(serde_json::Value::as_str).map(str::to_string);
        Self {
            question: text("question"),
            subject: text("subject"),
            top_k: fields
                .get("top_k")
                .and_then(serde_json::Value::as_u64)
                .and_then(|k| usize::try_from(k).ok()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub items: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub status: String,
    pub items: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::EmptyQuestion => Self { status: StatusCode::BAD_REQUEST, message: "Question is required.".to_string() },
            other => Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: other.to_string() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string(), items: state.engine.size() })
}

pub async fn ask(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Json<AnswerResult>, ApiError> {
    let request = AskRequest::from_body(&body);
    let question = request.question.as_deref().unwrap_or_default().trim();
    if question.is_empty() {
        return Err(Error::EmptyQuestion.into());
    }
    let subject = match request.subject.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_SUBJECT,
        Some(s) => s,
    };
    let top_k = request.top_k.unwrap_or(state.default_top_k);
    info!("Ask: subject='{}', top_k={}", subject, top_k);

    let result = state.engine.answer(question, subject, top_k).map_err(|e| {
        error!("Answering failed: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(result))
}

pub async fn reload(State(state): State<Arc<AppState>>) -> Result<Json<ReloadResponse>, ApiError> {
    let engine = Arc::clone(&state.engine);
    let items = tokio::task::spawn_blocking(move || engine.reload())
        .await
        .map_err(|e| ApiError { status: StatusCode::INTERNAL_SERVER_ERROR, message: e.to_string() })?
        .map_err(|e| {
            error!("Reload failed: {}", e);
            ApiError::from(e)
        })?;
    Ok(Json(ReloadResponse { status: "reloaded".to_string(), items }))
}
