//! MDM Webhook server.
//!
//! Listens for MicroMDM webhook callbacks and prints each decoded
//! acknowledge payload to stdout. Logs are written to stderr.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mdm_webhook::{serve, AppState, Config, StdoutSink};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .json()
                .flatten_event(true)
                .with_writer(std::io::stderr),
        )
        .init();

    info!("webhook_server_starting");

    let config = Config::from_env();
    info!(host = %config.host, port = config.port, "config_loaded");

    serve(&config, AppState::new(StdoutSink)).await?;

    Ok(())
}
