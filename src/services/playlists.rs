// ABOUTME: Playlist business logic: create a private playlist from track URIs and list playlists
// ABOUTME: Resolves the current user before creating, then adds tracks in catalog-sized batches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use paceify_providers::{AccessToken, MusicCatalog};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::constants::playlists::{DEFAULT_PLAYLIST_DESCRIPTION, DEFAULT_PLAYLIST_NAME};
use crate::errors::{AppError, AppResult};
use crate::models::Playlist;

/// Body of `POST /playlists/create`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistRequest {
    /// Playlist name; a default is used when blank
    pub name: Option<String>,
    /// Track URIs in playback order
    #[serde(default)]
    pub track_uris: Vec<String>,
}

/// Response of `POST /playlists/create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPlaylist {
    /// Catalog playlist id
    pub id: String,
    /// Playlist name
    pub name: String,
    /// Catalog URI
    pub uri: String,
    /// Number of tracks added
    pub tracks_count: usize,
}

/// Playlist entry of `GET /playlists`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    /// Catalog playlist id, usable as `playlistId` in `/filter`
    pub id: String,
    /// Playlist name
    pub name: String,
    /// Catalog URI
    pub uri: String,
    /// Track count reported by the catalog
    pub tracks_total: Option<u32>,
}

impl From<Playlist> for PlaylistSummary {
    fn from(playlist: Playlist) -> Self {
        Self {
            id: playlist.id,
            name: playlist.name,
            uri: playlist.uri,
            tracks_total: playlist.tracks_total,
        }
    }
}

/// Response of `GET /playlists`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistList {
    /// The user's playlists
    pub playlists: Vec<PlaylistSummary>,
}

/// Create a private playlist holding `trackUris`
///
/// # Errors
///
/// Returns `MISSING_REQUIRED_FIELD` (400) when no URIs are given, and catalog
/// failures mapped through `From<ProviderError>`
#[instrument(skip_all, fields(catalog = catalog.name(), tracks = request.track_uris.len()))]
pub async fn create_playlist(
    catalog: &dyn MusicCatalog,
    token: &AccessToken,
    request: &CreatePlaylistRequest,
) -> AppResult<CreatedPlaylist> {
    if request.track_uris.is_empty() {
        return Err(AppError::missing_field("No track URIs provided"));
    }

    let name = request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_PLAYLIST_NAME);

    let user = catalog.current_user(token).await?;
    let playlist = catalog
        .create_playlist(token, &user.id, name, DEFAULT_PLAYLIST_DESCRIPTION)
        .await?;
    let added = catalog
        .add_tracks(token, &playlist.id, &request.track_uris)
        .await?;

    info!(playlist_id = %playlist.id, added, "Playlist created");
    Ok(CreatedPlaylist {
        id: playlist.id,
        name: playlist.name,
        uri: playlist.uri,
        tracks_count: added,
    })
}

/// List the user's playlists
///
/// # Errors
///
/// Returns catalog failures mapped through `From<ProviderError>`
pub async fn list_playlists(
    catalog: &dyn MusicCatalog,
    token: &AccessToken,
) -> AppResult<PlaylistList> {
    let playlists = catalog.user_playlists(token).await?;
    Ok(PlaylistList {
        playlists: playlists.into_iter().map(PlaylistSummary::from).collect(),
    })
}
