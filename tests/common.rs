// ABOUTME: Shared test setup for Paceify integration tests
// ABOUTME: Quiet tracing initialization and routers backed by the demo or a fake Spotify catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

use std::sync::{Arc, Once};

use axum::Router;
use paceify::config::{CatalogProviderKind, ServerConfig, SpotifyApiConfig};
use paceify::oauth2_client::{OAuth2Config, SpotifyOAuthClient};
use paceify::resources::ServerResources;
use paceify::server::build_router;
use paceify_providers::{DemoCatalog, MusicCatalog, SpotifyCatalog};
use reqwest::Client;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration serving the demo catalog, without OAuth
pub fn demo_config() -> ServerConfig {
    ServerConfig {
        catalog_provider: CatalogProviderKind::Demo,
        ..ServerConfig::default()
    }
}

/// Spotify settings pointing at fake upstreams with a client id
pub fn spotify_api_config(api_base_url: &str, token_url: &str) -> SpotifyApiConfig {
    SpotifyApiConfig {
        client_id: Some("client-123".to_owned()),
        redirect_uri: "http://127.0.0.1:5173/dashboard".to_owned(),
        api_base_url: api_base_url.to_owned(),
        token_url: token_url.to_owned(),
        ..SpotifyApiConfig::default()
    }
}

/// Resources over an explicit catalog
pub fn resources_with(
    config: ServerConfig,
    catalog: Arc<dyn MusicCatalog>,
) -> Arc<ServerResources> {
    init_test_logging();
    let oauth_client = OAuth2Config::from_spotify(&config.spotify)
        .map(|oauth| SpotifyOAuthClient::with_client(oauth, Client::new()));
    Arc::new(ServerResources::new(config, catalog, oauth_client))
}

/// Resources over a fresh demo catalog
pub fn demo_resources() -> Arc<ServerResources> {
    resources_with(demo_config(), Arc::new(DemoCatalog::default()))
}

/// Full application router over a fresh demo catalog
pub fn demo_app() -> Router {
    build_router(demo_resources())
}

/// Full application router over a Spotify catalog at `api_base_url`
pub fn spotify_app(api_base_url: &str, token_url: &str) -> Router {
    let config = ServerConfig {
        spotify: spotify_api_config(api_base_url, token_url),
        ..ServerConfig::default()
    };
    let catalog = SpotifyCatalog::with_client(config.spotify.catalog_config(), Client::new());
    build_router(resources_with(config, Arc::new(catalog)))
}
