// ABOUTME: OAuth 2.0 client implementation for connecting to Spotify
// ABOUTME: Authorization code flow with PKCE for a public browser client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OAuth 2.0 Client Module
//!
//! Paceify acts as an OAuth 2.0 client on behalf of a browser dashboard. The
//! server never stores tokens: it hands the PKCE verifier to the browser at
//! login and receives it back at code exchange.

/// PKCE parameters and the Spotify accounts client
pub mod client;

pub use client::{AuthorizationRequest, OAuth2Config, PkceParams, SpotifyOAuthClient, TokenGrant};
