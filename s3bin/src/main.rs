//! s3bin - store posted payloads in an S3 bucket
//!
//! Not meant for public or production use: a single shared Basic credential
//! guards uploads, and stored objects are only reachable through the bucket.

use anyhow::Context;
use clap::Parser;
use s3bin::{create_router, AppState, Args, Config};
use s3bin_relay::storage::S3Storage;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load(&args).context("failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("s3bin={},tower_http=debug", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting s3bin...");
    info!("  Bucket: {}", config.bucket);
    info!("  Base path: {}", config.path);
    if let Some(endpoint) = &config.endpoint_url {
        info!("  Endpoint: {}", endpoint);
    }
    if config.uses_default_credentials() {
        warn!("Using the default upload credentials, set BINAPP_USER and BINAPP_PASS");
    }

    let storage = S3Storage::connect(&config.s3_options()).await;
    let state = AppState::new(Arc::new(storage), &config);

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("s3bin stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down...");
}
