mod api;
mod app_system;
mod clients;
mod domain;
mod error;
mod messages;
mod store;
mod store_actor;

#[cfg(test)]
mod mock_framework;

use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info, Level};

use crate::api::AppState;
use crate::app_system::{default_products, setup_tracing, Config, OrderSystem};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Dev convenience; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    setup_tracing();
    let config = Config::from_env()?;

    info!(addr = %config.addr, channel_capacity = config.channel_capacity, "Starting order service");

    let system = OrderSystem::new(&config);
    system
        .seed(default_products())
        .await
        .context("failed to seed catalog")?;

    let app = api::build_router(Arc::new(AppState::new(system.store_client.clone()))).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!("order-service listening on http://{}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server crashed")?;

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    info!("Order service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
