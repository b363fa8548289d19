use std::sync::Arc;

use studyhall_qa::QaEngine;

/// Shared application state
pub struct AppState {
    pub engine: Arc<QaEngine>,
    /// Result window used when a request does not name one
    pub default_top_k: usize,
}

impl AppState {
    pub fn new(engine: QaEngine, default_top_k: usize) -> Self {
        Self { engine: Arc::new(engine), default_top_k }
    }
}
