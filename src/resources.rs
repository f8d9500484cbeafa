// ABOUTME: Centralized resource container for dependency injection into route handlers
// ABOUTME: Holds configuration, the active music catalog, the OAuth client and the estimator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared with every router through
//! `Arc<ServerResources>`.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use paceify_providers::MusicCatalog;
#[cfg(feature = "provider-demo")]
use paceify_providers::DemoCatalog;
#[cfg(feature = "provider-spotify")]
use paceify_providers::SpotifyCatalog;
use paceify_tempo::CadenceEstimator;
use tracing::info;

use crate::config::{CatalogProviderKind, ServerConfig};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::oauth2_client::{OAuth2Config, SpotifyOAuthClient};

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Catalog the track pools come from
    pub catalog: Arc<dyn MusicCatalog>,
    /// Spotify OAuth client; absent without a configured client id
    pub oauth_client: Option<Arc<SpotifyOAuthClient>>,
    /// Pace to cadence estimator over the configured stride table
    pub estimator: Arc<CadenceEstimator>,
}

impl ServerResources {
    /// Assemble resources from parts
    #[must_use]
    pub fn new(
        config: ServerConfig,
        catalog: Arc<dyn MusicCatalog>,
        oauth_client: Option<SpotifyOAuthClient>,
    ) -> Self {
        let estimator = Arc::new(
            CadenceEstimator::new(config.tempo.strides.clone())
                .with_fallback_cadence(config.tempo.fallback_cadence),
        );
        Self {
            config: Arc::new(config),
            catalog,
            oauth_client: oauth_client.map(Arc::new),
            estimator,
        }
    }

    /// Build the catalog and OAuth client the configuration asks for
    ///
    /// # Errors
    ///
    /// Returns an error if the configured catalog was compiled out
    pub fn from_config(config: ServerConfig) -> Result<Self> {
        let catalog = build_catalog(&config)?;
        let oauth_client = OAuth2Config::from_spotify(&config.spotify).map(SpotifyOAuthClient::new);
        info!(
            catalog = catalog.name(),
            oauth = oauth_client.is_some(),
            "Server resources initialized"
        );
        Ok(Self::new(config, catalog, oauth_client))
    }

    /// The OAuth client, or a configuration error when none is configured
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_MISSING` (500) if `SPOTIFY_CLIENT_ID` was not set
    pub fn require_oauth_client(&self) -> AppResult<&SpotifyOAuthClient> {
        self.oauth_client.as_deref().ok_or_else(|| {
            AppError::new(ErrorCode::ConfigMissing, "SPOTIFY_CLIENT_ID is not configured")
        })
    }
}

fn build_catalog(config: &ServerConfig) -> Result<Arc<dyn MusicCatalog>> {
    match config.catalog_provider {
        #[cfg(feature = "provider-spotify")]
        CatalogProviderKind::Spotify => Ok(Arc::new(SpotifyCatalog::new(
            config.spotify.catalog_config(),
        ))),
        #[cfg(feature = "provider-demo")]
        CatalogProviderKind::Demo => Ok(Arc::new(DemoCatalog::default())),
        #[allow(unreachable_patterns)]
        other => Err(anyhow!(
            "Catalog provider '{other}' is not compiled into this build"
        )),
    }
}
