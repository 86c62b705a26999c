//! Trellis lead-form relay service.
//!
//! Main entry point. Loads immutable configuration, builds the outbound
//! channel clients, and serves the HTTP API until shutdown.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use trellis_api::{start_server, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with structured logging
    init_tracing();

    info!("Starting Trellis lead-form relay");

    // Load configuration from environment; credentials are validated here
    let config = Config::load()?;
    info!(
        host = %config.host,
        port = config.port,
        recipients = config.recipient_list().len(),
        "Configuration loaded"
    );

    let state = AppState::from_config(&config).context("Failed to build application state")?;
    let addr = config.parse_server_addr()?;

    info!(addr = %addr, "Trellis is ready to receive submissions");

    start_server(state, addr, Duration::from_secs(config.request_timeout))
        .await
        .context("Server failed")?;

    info!("Trellis shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,trellis=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
