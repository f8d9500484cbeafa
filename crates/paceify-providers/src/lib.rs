// ABOUTME: Music catalog implementations for Spotify and an in-memory demo library
// ABOUTME: Catalog trait, circuit breaker, and shared HTTP client for catalog API calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Music catalog providers and core abstractions.
//!
//! A catalog is a black box that lists the user's tracks with tempo metadata,
//! lists recommendations for a tempo window and creates playlists. Every call
//! takes the caller's [`AccessToken`] explicitly; providers hold no per-user
//! state.

pub use paceify_core::constants;
pub use paceify_core::errors;
pub use paceify_core::models;

/// Circuit breaker pattern for catalog resilience
pub mod circuit_breaker;
/// Core catalog traits and request types
pub mod core;
/// Shared HTTP client for catalog API calls
pub mod http_client;

/// In-memory demo catalog
#[cfg(feature = "provider-demo")]
pub mod demo;
/// Spotify Web API catalog
#[cfg(feature = "provider-spotify")]
pub mod spotify;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use core::{AccessToken, MusicCatalog, RecommendationQuery, RecommendationSeeds};
pub use http_client::{initialize_shared_client, shared_client};
pub use paceify_core::errors::provider::{ProviderError, ProviderResult};

#[cfg(feature = "provider-demo")]
pub use demo::DemoCatalog;
#[cfg(feature = "provider-spotify")]
pub use spotify::{SpotifyCatalog, SpotifyConfig};
