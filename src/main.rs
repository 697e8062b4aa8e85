//! postbox server entry point.
//!
//! Loads configuration, selects the storage backend, and starts the Axum
//! HTTP server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use postbox::api;
use postbox::app_state::AppState;
use postbox::config::{LogFormat, ServerConfig};
use postbox::persistence::{
    InMemorySubmissionRepository, PostgresSubmissionRepository, SubmissionRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("invalid configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(addr = %config.listen_addr, "starting postbox");

    // Build persistence layer
    let repository: Arc<dyn SubmissionRepository> = if config.persistence_enabled {
        Arc::new(
            PostgresSubmissionRepository::connect(&config)
                .await
                .context("failed to initialize postgres storage")?,
        )
    } else {
        tracing::warn!("persistence disabled; submissions are kept in memory only");
        Arc::new(InMemorySubmissionRepository::new())
    };

    // Build router
    let app = api::build_app(
        AppState::new(repository),
        Duration::from_secs(config.request_timeout_secs),
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
