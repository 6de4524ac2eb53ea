//! # rp-server
//!
//! Axum server hosting the SAML relying-party endpoints:
//!
//! - Sign-in initiation (outbound `AuthnRequest` over the redirect binding)
//! - Assertion consumer service (inbound responses over both bindings)
//! - Health check endpoint
//!
//! ## Architecture
//!
//! The server wires the `rp-saml` collaborators (registration repository,
//! request store, token converter) into shared [`AppState`] and exposes them
//! through a small set of handlers. Everything downstream of the produced
//! token - parsing, signature verification, assertion validation - is out of
//! this server's hands.
//!
//! ## Usage
//!
//! ```ignore
//! use rp_server::ServerConfig;
//!
//! let config = ServerConfig::from_env()?;
//! rp_server::run(config).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use router::create_router;
pub use state::AppState;

use std::net::SocketAddr;

use tokio::net::TcpListener;

/// Runs the server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(config.clone());
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("relying party listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Waits for a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
