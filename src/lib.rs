// ABOUTME: Main library entry point for the Paceify cadence playlist service
// ABOUTME: Wires configuration, logging, OAuth, catalog access and the axum HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Paceify
//!
//! An HTTP service that turns a running pace into a step cadence and returns
//! the tracks of a Spotify library whose tempo falls inside a window around
//! that cadence. When the library has no match, recommendations constrained to
//! the same window are returned instead.
//!
//! ## Architecture
//!
//! - **`paceify-core`**: errors, constants and the track/pace models
//! - **`paceify-tempo`**: cadence estimation and tempo matching, free of I/O
//! - **`paceify-providers`**: the `MusicCatalog` trait with Spotify and demo catalogs
//! - **this crate**: configuration, logging, the OAuth PKCE client, services and routes
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use paceify::config::environment::ServerConfig;
//! use paceify::resources::ServerResources;
//! use paceify::server::build_router;
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! let resources = Arc::new(ServerResources::from_config(config)?);
//! let _app = build_router(resources);
//! # Ok(())
//! # }
//! ```

pub use paceify_core::{constants, errors, models};

/// Environment-based server configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (bearer token extraction, CORS)
pub mod middleware;

/// Spotify OAuth 2.0 client with PKCE
pub mod oauth2_client;

/// Shared server resources for dependency injection
pub mod resources;

/// HTTP route handlers organized by domain
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Business logic behind the routes
pub mod services;
