//! kudos-api entry point.
//!
//! Boots the testimonials HTTP API. Logs are JSON on stderr, filtered by `RUST_LOG`.

use std::sync::Arc;

use anyhow::Result;
use kudos_core::MemoryCache;
use kudos_core::config::AppConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod error;
mod middleware;
mod routes;
mod state;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let state = state::AppState::from_config(&config, Arc::new(MemoryCache::new()));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        configured = state.is_configured(),
        "starting kudos-api"
    );

    axum::serve(listener, routes::build_router(state).into_make_service()).await?;

    Ok(())
}
