//! # lcfs-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for report summaries.
//! Binds to `PORT` (default 8080) and seeds the store from `LCFS_SEED_FILE`.

use lcfs_api::state::{AppConfig, AppState};
use lcfs_schema::LedgerLayout;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let port = config.port;
    let state = AppState::with_layout(config, LedgerLayout::renewable_fuel())?;

    if let Some(path) = state.config.seed_file.clone() {
        let count = state.load_seed(&path).map_err(|e| {
            tracing::error!(path = %path.display(), "failed to load seed file: {e}");
            e
        })?;
        tracing::info!(path = %path.display(), reports = count, "seeded summary store");
    }

    let app = lcfs_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("LCFS summary API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
