// ABOUTME: Spotify Web API request and response structures
// ABOUTME: Lenient decoding of paging objects, tracks, audio features and error envelopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::models::{AudioFeatures, CatalogUser, Playlist, Track};

#[derive(Debug, Deserialize)]
pub(super) struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub next: Option<String>,
}

/// Item of `/me/tracks` and `/playlists/{id}/tracks`; `track` is null for
/// removed or local items
#[derive(Debug, Deserialize)]
pub(super) struct TrackItem {
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SpotifyTrack {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<NamedObject>,
    pub album: Option<NamedObject>,
    #[serde(default)]
    pub duration_ms: u64,
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NamedObject {
    #[serde(default)]
    pub name: String,
}

impl SpotifyTrack {
    /// Convert to the domain model; tracks without an id are dropped
    pub fn into_track(self) -> Option<Track> {
        let id = self.id?;
        let track = Track::new(
            id,
            self.name,
            self.artists.into_iter().map(|artist| artist.name).collect(),
            self.album.map(|album| album.name).unwrap_or_default(),
            self.duration_ms,
        );
        Some(match self.uri {
            Some(uri) => track.with_uri(uri),
            None => track,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AudioFeaturesResponse {
    #[serde(default)]
    pub audio_features: Vec<Option<SpotifyAudioFeatures>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SpotifyAudioFeatures {
    pub id: String,
    pub tempo: Option<f64>,
    pub energy: Option<f64>,
    pub danceability: Option<f64>,
}

impl SpotifyAudioFeatures {
    pub fn into_features(self) -> Option<(String, AudioFeatures)> {
        let tempo = self.tempo?;
        Some((
            self.id,
            AudioFeatures {
                tempo,
                energy: self.energy,
                danceability: self.danceability,
            },
        ))
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RecommendationsResponse {
    #[serde(default)]
    pub tracks: Vec<SpotifyTrack>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SpotifyUser {
    pub id: String,
    pub display_name: Option<String>,
}

impl From<SpotifyUser> for CatalogUser {
    fn from(user: SpotifyUser) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SpotifyPlaylist {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    pub tracks: Option<TracksRef>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TracksRef {
    pub total: Option<u32>,
}

impl From<SpotifyPlaylist> for Playlist {
    fn from(playlist: SpotifyPlaylist) -> Self {
        Self {
            id: playlist.id,
            name: playlist.name,
            uri: playlist.uri,
            tracks_total: playlist.tracks.and_then(|tracks| tracks.total),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CreatePlaylistBody<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub public: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct AddTracksBody<'a> {
    pub uris: &'a [String],
}

/// `{"error": {"status": 401, "message": "..."}}`
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ErrorBody {
    Detailed { message: String },
    // Accounts service uses a bare string plus `error_description`
    Code(String),
}

impl ErrorBody {
    pub fn into_message(self) -> String {
        match self {
            Self::Detailed { message } | Self::Code(message) => message,
        }
    }
}
