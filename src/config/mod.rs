// ABOUTME: Configuration module for the Paceify server
// ABOUTME: Environment-only configuration with typed sections and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration is read from environment variables only. There is no
//! configuration file.

/// Environment variable loading, validation and summary
pub mod environment;

pub use environment::{
    CatalogProviderKind, CorsConfig, Environment, HttpClientConfig, RecommendationConfig,
    ServerConfig, SpotifyApiConfig,
};
