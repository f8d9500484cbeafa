// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for cadence estimation, catalog access and the HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single large file.

/// Running cadence and stride heuristics
pub mod cadence;
/// Spotify Web API endpoints, scopes and paging limits
pub mod spotify;

/// Service names used in structured logs
pub mod service_names {
    /// HTTP server binary
    pub const PACEIFY_SERVER: &str = "paceify-server";
    /// Spotify catalog provider
    pub const SPOTIFY: &str = "spotify";
    /// In-memory demo catalog
    pub const DEMO_CATALOG: &str = "demo";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
}

/// Playlist defaults
pub mod playlists {
    /// Name used when a playlist is created without one
    pub const DEFAULT_PLAYLIST_NAME: &str = "Paceify Running Mix";
    /// Description attached to created playlists
    pub const DEFAULT_PLAYLIST_DESCRIPTION: &str = "";
}

/// OAuth PKCE parameters
pub mod oauth {
    /// Length of generated PKCE code verifiers (RFC 7636 allows 43 to 128)
    pub const CODE_VERIFIER_LENGTH: usize = 128;
    /// PKCE challenge method
    pub const CODE_CHALLENGE_METHOD: &str = "S256";
}
