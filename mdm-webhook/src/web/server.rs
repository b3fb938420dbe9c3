//! Router construction and the listener loop.

use std::future::Future;

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, routing::post, Router};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::web::handlers::{webhook, AppState};
use crate::Config;

/// Path MicroMDM is configured to call.
pub const WEBHOOK_PATH: &str = "/webhook";

/// Build the router. Only `POST /webhook` is registered.
///
/// Acknowledge plists such as `InstalledApplicationList` can exceed axum's
/// default 2 MiB body limit, so no limit is applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(webhook))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured address and serve until SIGINT/SIGTERM.
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    serve_listener(listener, state, wait_for_shutdown()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// `shutdown` yields the name of whatever stopped the server, for the log.
pub async fn serve_listener<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = &'static str> + Send + 'static,
{
    let addr = listener
        .local_addr()
        .context("Failed to read listener address")?;

    info!(address = %addr, path = WEBHOOK_PATH, "webhook_server_listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            let reason = shutdown.await;
            info!(address = %addr, reason, "webhook_server_shutting_down");
        })
        .await
        .context("Server error")?;

    info!(address = %addr, "webhook_server_shutdown_complete");

    Ok(())
}

/// Resolves with the name of the first shutdown signal received.
async fn wait_for_shutdown() -> &'static str {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "sigint_handler_unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "sigterm_handler_unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}
