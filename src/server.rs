// ABOUTME: Router assembly and HTTP serving with graceful shutdown
// ABOUTME: Merges domain routers under CORS and request tracing layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::future::{pending, Future};
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, FilterRoutes, HealthRoutes, PlaylistRoutes};

/// Build the complete application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors);
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(FilterRoutes::routes(Arc::clone(&resources)))
        .merge(PlaylistRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve the router on the configured address until `shutdown` resolves
///
/// # Errors
///
/// Returns an error if the address is invalid, binding fails, or the server
/// stops with an I/O error
pub async fn serve_with_shutdown<F>(resources: Arc<ServerResources>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = format!("{}:{}", resources.config.host, resources.config.http_port)
        .parse()
        .context("Invalid HOST/HTTP_PORT combination")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("Paceify listening on http://{addr}");
    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;
    info!("Server shutdown complete");
    Ok(())
}

/// Serve until Ctrl-C
///
/// # Errors
///
/// See [`serve_with_shutdown`]
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    serve_with_shutdown(resources, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        // Without a signal handler, never trigger shutdown
        pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
