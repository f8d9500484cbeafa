// ABOUTME: Spotify Web API and accounts service constants
// ABOUTME: Endpoint URLs, OAuth scopes, paging sizes and batch limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Web API root
pub const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// OAuth authorization endpoint
pub const AUTH_URL: &str = "https://accounts.spotify.com/authorize";

/// OAuth token endpoint
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Redirect URI used when none is configured
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:5173/dashboard";

/// Scopes requested at login
pub const OAUTH_SCOPES: &str = "playlist-modify-private playlist-modify-public user-read-private user-read-email user-library-read";

/// Saved tracks page size
pub const SAVED_TRACKS_PAGE_SIZE: u32 = 50;

/// Saved tracks page cap
pub const SAVED_TRACKS_MAX_PAGES: u32 = 5;

/// Playlist tracks page size
pub const PLAYLIST_TRACKS_PAGE_SIZE: u32 = 100;

/// Playlist tracks page cap
pub const PLAYLIST_TRACKS_MAX_PAGES: u32 = 10;

/// Maximum ids per audio-features request
pub const AUDIO_FEATURES_BATCH_SIZE: usize = 100;

/// Maximum URIs per add-tracks request
pub const PLAYLIST_ADD_BATCH_SIZE: usize = 100;

/// Maximum seed tracks per recommendation request
pub const MAX_RECOMMENDATION_SEEDS: usize = 5;

/// Recommendations requested when none is configured
pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 20;

/// Hard upper bound accepted by the recommendations endpoint
pub const MAX_RECOMMENDATION_LIMIT: u32 = 100;

/// Genres seeding recommendations when the library gives no seed tracks
pub const DEFAULT_SEED_GENRES: [&str; 3] = ["pop", "rock", "electronic"];
