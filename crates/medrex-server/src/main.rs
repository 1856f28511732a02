//! medrex server — application entry point.

mod config;
mod error;
mod guard;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Context;
use medrex_db::DbManager;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("medrex=info".parse()?),
        )
        .json()
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(port = config.port, db = %config.db.url, "starting medrex server");

    let manager = DbManager::connect(&config.db)
        .await
        .context("database connection failed")?;
    manager.migrate().await.context("migrations failed")?;

    let state = Arc::new(AppState::new(manager.client().clone(), config.auth.clone()));
    let app = routes::router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("medrex server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
