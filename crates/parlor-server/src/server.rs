//! Room server lifecycle and configuration.
//!
//! Provides [`ServerConfig`] (environment-driven) and [`start_server`],
//! which binds a TCP port and runs the Axum server until the process is
//! terminated.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Default TCP port when `PARLOR_PORT` is unset.
const DEFAULT_PORT: u16 = 8080;

/// Configuration for the room server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// - `PARLOR_HOST` overrides the bind address (default `0.0.0.0`)
    /// - `PARLOR_PORT` overrides the port (default `8080`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] when `PARLOR_PORT` is set but
    /// not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("PARLOR_HOST").unwrap_or_else(|_| String::from("0.0.0.0"));
        let port = match std::env::var("PARLOR_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value: raw, source })?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: DEFAULT_PORT,
        }
    }
}

/// Errors that can occur when loading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `PARLOR_PORT` was set to something that is not a port number.
    #[error("invalid PARLOR_PORT {value:?}: {source}")]
    InvalidPort {
        /// The rejected value.
        value: String,
        /// The underlying parse error.
        source: std::num::ParseIntError,
    },
}

/// Start the room HTTP server.
///
/// Binds to the configured address, builds the router, and serves
/// requests until the process is terminated. Returns `Ok(())` on clean
/// shutdown, or an error if binding or serving fails.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind or the server
/// encounters a fatal I/O error.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "Parlor server listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    Ok(())
}

/// Errors that can occur when starting or running the room server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}
