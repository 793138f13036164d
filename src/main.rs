mod api_doc;
mod app;
mod config;
mod error;
mod handlers;
mod memory;
mod models;
mod routes;
mod service;
mod spanner;
mod state;
mod store;

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use config::{Config, StoreBackend};
use memory::InMemoryPetStore;
use service::PetService;
use spanner::SpannerPetStore;
use state::AppState;
use store::PetStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("rust-spanner-pets starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store: Arc<dyn PetStore> = match &config.store {
        StoreBackend::Spanner(spanner) => Arc::new(SpannerPetStore::from_config(spanner).await?),
        StoreBackend::Memory => Arc::new(InMemoryPetStore::new()),
    };

    let state = AppState {
        pets: PetService::new(store),
    };

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("rust-spanner-pets stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
