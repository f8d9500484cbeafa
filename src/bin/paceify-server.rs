// ABOUTME: Server binary for the Paceify cadence playlist API
// ABOUTME: Loads configuration, initializes logging and the shared HTTP client, then serves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Paceify Server Binary
//!
//! Starts the HTTP API. Configuration comes from the environment; the flags
//! below override individual values.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use paceify::{
    config::{environment::ServerConfig, CatalogProviderKind},
    logging,
    resources::ServerResources,
    server,
};
use paceify_providers::initialize_shared_client;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "paceify-server")]
#[command(about = "Paceify - match running cadence to your Spotify library")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Serve the in-memory demo catalog instead of Spotify
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if args.demo {
        config.catalog_provider = CatalogProviderKind::Demo;
    }

    info!("{}", config.summary());

    initialize_shared_client(
        config.http_client.timeout_secs,
        config.http_client.connect_timeout_secs,
    );

    let resources = Arc::new(ServerResources::from_config(config)?);
    display_available_endpoints();

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}

fn display_available_endpoints() {
    info!("Available endpoints:");
    info!("  GET  /health              - Liveness");
    info!("  GET  /ready               - Readiness");
    info!("  GET  /auth/login          - Spotify authorization URL and PKCE verifier");
    info!("  POST /auth/token          - Exchange authorization code for tokens");
    info!("  POST /filter              - Match tracks to a pace or cadence");
    info!("  GET  /filter/pace-table   - Pace to cadence conversion table");
    info!("  GET  /playlists           - List the user's playlists");
    info!("  POST /playlists/create    - Create a playlist from track URIs");
}
