//! UserHaus server entry point
//!
//! Loads configuration, connects store and cache, ensures the schema and
//! serves the HTTP API until Ctrl-C.

use anyhow::Context;
use userhaus::telemetry::init_tracing;
use userhaus::{AppConfig, UserHaus, http};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(config.server.environment)?;

    let addr = config.server.bind_address();
    let userhaus = UserHaus::new(config)
        .await
        .context("Failed to connect the record store")?;
    userhaus
        .migrate()
        .await
        .context("Failed to prepare the record table")?;

    let app = http::router(userhaus.service());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(
        %addr,
        cache = userhaus.cache().backend_name(),
        "Starting userhaus server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
