//! HTTP API for the question-answering engine
//!
//! - `GET /health`: liveness plus corpus size
//! - `POST /api/ask`: answer a question
//! - `POST /api/reload`: rebuild the index from the corpus store

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/ask", post(handlers::ask))
        .route("/api/reload", post(handlers::reload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
