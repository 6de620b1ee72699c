use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use produce_planner::config::ServerConfig;
use produce_planner::ingest;
use produce_planner::optimizer::OptimizerConfig;
use produce_planner::web::{AppState, Snapshot, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().context("reading server configuration")?;

    let dataset = ingest::load_file(&config.data_path, OptimizerConfig::default())
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    let addr = config.addr;
    let state = AppState::new(Snapshot::from(dataset), config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "produce planner listening");
    info!("  GET  /health         - Health check");
    info!("  GET  /routes         - List routes");
    info!("  POST /routes         - Add a route");
    info!("  GET  /path           - Shortest path");
    info!("  POST /plan           - Compute transport plans");
    info!("  POST /plan/report    - Transport plans as text");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
