//! Sargassum Drift HTTP Server Binary
//!
//! Main entry point for the drift REST API server. It loads the
//! configuration, builds the prediction source, sets up the HTTP router and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run against the remote prediction API (default)
//! cargo run --bin drift-server
//!
//! # Run with the in-memory source, which serves an empty prediction
//! DRIFT_SOURCE_TYPE=local cargo run --bin drift-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `DRIFT_SOURCE_TYPE`: `http` or `local` (default: http)
//! - `DRIFT_SOURCE_URL`: Prediction endpoint for the http source
//! - `DRIFT_RENDER_SEED`: Fixed particle seed for reproducible frames
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sargassum_drift::config::DriftConfig;
use sargassum_drift::http::{create_router, AppState};
use sargassum_drift::render::RenderOptions;
use sargassum_drift::source::SourceFactory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Sargassum Drift HTTP Server");

    let config = DriftConfig::load()?;
    let repository = SourceFactory::create(&config.source)?;
    info!("Prediction source: {}", repository.describe());

    let state =
        AppState::new(repository).with_render_options(RenderOptions::from(&config.render));

    // Create router with all endpoints
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
