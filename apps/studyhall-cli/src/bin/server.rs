use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use studyhall_cli::init_tracing;
use studyhall_cli::server::{router, AppState};
use studyhall_core::config::Config;
use studyhall_core::traits::Answerer;
use studyhall_qa::QaEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(&["studyhall=info", "tower_http=debug"])?;

    let config = Config::load()?;
    let qa = config.qa()?;
    let server = config.server()?;
    let dataset_path = qa.resolved_dataset_path(&std::env::current_dir()?);

    info!("Loading corpus from {}", dataset_path.display());
    let engine = QaEngine::open(&dataset_path)?;
    info!("Serving {} corpus entries", engine.size());
    let state = Arc::new(AppState::new(engine, qa.default_top_k));

    let addr: SocketAddr = format!("{}:{}", server.host, server.port).parse()?;
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
