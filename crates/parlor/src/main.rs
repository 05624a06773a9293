//! Parlor server entry point.
//!
//! Wires together configuration, shared state, and the Axum server. The
//! process serves REST room lifecycle endpoints and the per-room
//! `WebSocket` streams until it is terminated.

use std::sync::Arc;

use parlor_server::{AppState, ServerConfig, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// then serves rooms until the process is terminated.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server cannot
/// bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("parlor starting");

    // 2. Load configuration.
    let config = ServerConfig::from_env()?;
    info!(host = config.host, port = config.port, "configuration loaded");

    // 3. Create shared state (empty in-memory store; rooms are created
    //    through the API).
    let state = Arc::new(AppState::new());

    // 4. Serve until terminated.
    start_server(&config, state).await?;

    Ok(())
}
