// ABOUTME: Playlist and catalog user models returned by catalog writes
// ABOUTME: Minimal shapes needed to list, create and report playlists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Catalog account owning created playlists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogUser {
    /// Catalog user id
    pub id: String,
    /// Display name, when public
    pub display_name: Option<String>,
}

/// A playlist owned by the catalog user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Catalog playlist id
    pub id: String,
    /// Playlist name
    pub name: String,
    /// Catalog URI
    pub uri: String,
    /// Number of tracks, when the catalog reports it
    pub tracks_total: Option<u32>,
}
