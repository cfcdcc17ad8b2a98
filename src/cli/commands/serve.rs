use std::sync::Arc;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::{error, info};

use crate::api;
use crate::state::SharedState;

pub async fn cmd_serve(
    state: SharedState,
    port: Option<u16>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    let port = port.unwrap_or(state.config.server.port);

    info!(
        "cinetrend v{} starting API server...",
        env!("CARGO_PKG_VERSION")
    );

    let app_state = api::create_app_state(Arc::new(state), prometheus_handle);
    let app = api::router(app_state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Web server running at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => error!("Error listening for shutdown: {}", e),
            }
        })
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}
