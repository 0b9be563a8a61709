//! `mahasiswa`: the student record server binary.
//!
//! Usage:
//!   mahasiswa [--listen <addr>] [--data-file <path>] [--flash-ttl-ms <ms>] [--log-json]
//!
//! Every flag can also be given through its `MAHASISWA_*` environment variable.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mahasiswa::{web, AppContext, Config, DocumentStore, FileDocumentStore, InMemoryDocumentStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize logging.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    match &config.data_file {
        Some(path) => {
            let store = FileDocumentStore::open(path)
                .with_context(|| format!("failed to open data file {}", path.display()))?;
            info!("Using document snapshot {}", path.display());
            run(store, &config).await
        }
        None => {
            info!("Using in-memory document store");
            run(InMemoryDocumentStore::new(), &config).await
        }
    }
}

async fn run<S: DocumentStore + 'static>(store: S, config: &Config) -> anyhow::Result<()> {
    let ctx = Arc::new(AppContext::new(store, config.flash_ttl()));

    let listener = TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    info!("App listening on http://{}", listener.local_addr()?);

    web::serve(ctx.clone(), listener, shutdown_signal()).await?;

    ctx.close()?;
    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
