//! Claim Wizard - API Server Binary
//!
//! Starts the HTTP API driving a single claim intake wizard session.
//!
//! # Usage
//!
//! ```bash
//! # Run with an in-memory session
//! cargo run --bin claim-wizard-api
//!
//! # Persist the session across restarts
//! WIZARD_STORE_PATH=./data/wizard.json cargo run --bin claim-wizard-api
//! ```
//!
//! # Environment Variables
//!
//! * `WIZARD_HOST` - Server host (default: 0.0.0.0)
//! * `WIZARD_PORT` - Server port (default: 8080)
//! * `WIZARD_STORE_PATH` - JSON file for the draft store (default: in memory)
//! * `WIZARD_ADDRESS_BOOK_PATH` - JSON address book (default: built-in)
//! * `WIZARD_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;

use anyhow::Context;
use interface_api::{build_wizard, config::ApiConfig, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("loading WIZARD_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting claim wizard API server"
    );

    let wizard = build_wizard(&config)?;
    tracing::info!(step = %wizard.step(), claim_id = ?wizard.claim_id(), "session resumed");

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    let app = create_router(wizard, config);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber; `RUST_LOG` overrides the configured level
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
