// ABOUTME: In-memory demo catalog preloaded with a small running library
// ABOUTME: Lets the server and tests exercise every catalog operation without Spotify credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::constants::service_names;
use crate::core::{AccessToken, MusicCatalog, RecommendationQuery};
use crate::errors::provider::{ProviderError, ProviderResult};
use crate::models::{AudioFeatures, CatalogUser, Playlist, Track};

/// Playlist preloaded with the whole demo library
pub const DEMO_LIBRARY_PLAYLIST_ID: &str = "demo-library";

const DEMO_USER_ID: &str = "demo-runner";

fn demo_track(
    id: &str,
    name: &str,
    artists: &[&str],
    album: &str,
    duration_ms: u64,
    (tempo, energy, danceability): (f64, f64, f64),
) -> Track {
    Track::new(
        id,
        name,
        artists.iter().map(|&artist| artist.to_owned()).collect(),
        album,
        duration_ms,
    )
    .with_features(AudioFeatures {
        tempo,
        energy: Some(energy),
        danceability: Some(danceability),
    })
    .with_uri(format!("spotify:track:{id}"))
}

/// Library used by the demo catalog
#[must_use]
pub fn demo_library() -> Vec<Track> {
    vec![
        demo_track("track1", "Running Up That Hill", &["Kate Bush"], "Hounds of Love", 298_000, (125.9, 0.7, 0.6)),
        demo_track("track2", "Eye of the Tiger", &["Survivor"], "Eye of the Tiger", 246_000, (109.0, 0.9, 0.8)),
        demo_track("track3", "Don't Stop Believin'", &["Journey"], "Escape", 251_000, (119.0, 0.8, 0.7)),
        demo_track("track4", "Uptown Funk", &["Mark Ronson", "Bruno Mars"], "Uptown Special", 269_000, (115.0, 0.9, 0.9)),
        demo_track("track5", "Thunderstruck", &["AC/DC"], "The Razors Edge", 292_000, (133.0, 1.0, 0.6)),
    ]
}

/// Recommendation pool used by the demo catalog
#[must_use]
pub fn demo_recommendations() -> Vec<Track> {
    vec![
        demo_track("rec1", "Pump It", &["The Black Eyed Peas"], "Monkey Business", 214_000, (120.0, 0.9, 0.8)),
        demo_track(
            "rec2",
            "Can't Stop the Feeling!",
            &["Justin Timberlake"],
            "Trolls (Original Motion Picture Soundtrack)",
            236_000,
            (113.0, 0.8, 0.9),
        ),
        demo_track("rec3", "Good 4 U", &["Olivia Rodrigo"], "SOUR", 178_000, (164.0, 0.9, 0.6)),
        demo_track("rec4", "Levitating", &["Dua Lipa"], "Future Nostalgia", 203_000, (103.0, 0.8, 0.8)),
    ]
}

/// Non-positive bounds are unset, as in the Spotify query parameters
fn within_bounds(query: &RecommendationQuery, tempo: f64) -> bool {
    (query.min_tempo <= 0.0 || tempo >= query.min_tempo)
        && (query.max_tempo <= 0.0 || tempo <= query.max_tempo)
}

#[derive(Debug)]
struct StoredPlaylist {
    playlist: Playlist,
    uris: Vec<String>,
}

/// Catalog served entirely from memory
///
/// Any non-empty token is accepted. Playlists created through it live until
/// the process exits.
pub struct DemoCatalog {
    library: Vec<Track>,
    recommendations: Vec<Track>,
    playlists: RwLock<HashMap<String, StoredPlaylist>>,
}

impl Default for DemoCatalog {
    fn default() -> Self {
        Self::new(demo_library(), demo_recommendations())
    }
}

impl DemoCatalog {
    /// Catalog over custom pools
    #[must_use]
    pub fn new(library: Vec<Track>, recommendations: Vec<Track>) -> Self {
        let uris = library.iter().filter_map(|track| track.uri.clone()).collect();
        let preset = StoredPlaylist {
            playlist: Playlist {
                id: DEMO_LIBRARY_PLAYLIST_ID.to_owned(),
                name: "Demo Library".to_owned(),
                uri: format!("spotify:playlist:{DEMO_LIBRARY_PLAYLIST_ID}"),
                tracks_total: None,
            },
            uris,
        };
        Self {
            library,
            recommendations,
            playlists: RwLock::new(HashMap::from([(DEMO_LIBRARY_PLAYLIST_ID.to_owned(), preset)])),
        }
    }

    fn authorize(token: &AccessToken) -> ProviderResult<()> {
        if token.secret().trim().is_empty() {
            return Err(ProviderError::AuthenticationFailed {
                provider: service_names::DEMO_CATALOG.to_owned(),
                reason: "Empty access token".to_owned(),
            });
        }
        Ok(())
    }

    fn lookup<'a>(&'a self, uri: &str) -> Option<&'a Track> {
        self.library
            .iter()
            .chain(&self.recommendations)
            .find(|track| track.uri.as_deref() == Some(uri))
    }

    /// URIs currently stored in a playlist
    pub async fn playlist_uris(&self, playlist_id: &str) -> Option<Vec<String>> {
        self.playlists
            .read()
            .await
            .get(playlist_id)
            .map(|stored| stored.uris.clone())
    }
}

#[async_trait]
impl MusicCatalog for DemoCatalog {
    fn name(&self) -> &'static str {
        service_names::DEMO_CATALOG
    }

    async fn saved_tracks(&self, token: &AccessToken) -> ProviderResult<Vec<Track>> {
        Self::authorize(token)?;
        Ok(self.library.clone())
    }

    async fn playlist_tracks(&self, token: &AccessToken, playlist_id: &str) -> ProviderResult<Vec<Track>> {
        Self::authorize(token)?;
        let playlists = self.playlists.read().await;
        let stored = playlists
            .get(playlist_id)
            .ok_or_else(|| ProviderError::NotFound {
                provider: service_names::DEMO_CATALOG.to_owned(),
                resource_type: "playlist".to_owned(),
                resource_id: playlist_id.to_owned(),
            })?;
        Ok(stored
            .uris
            .iter()
            .filter_map(|uri| self.lookup(uri).cloned())
            .collect())
    }

    async fn recommendations(
        &self,
        token: &AccessToken,
        query: &RecommendationQuery,
    ) -> ProviderResult<Vec<Track>> {
        Self::authorize(token)?;
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(self
            .recommendations
            .iter()
            .filter(|track| track.tempo.is_some_and(|tempo| within_bounds(query, tempo)))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn user_playlists(&self, token: &AccessToken) -> ProviderResult<Vec<Playlist>> {
        Self::authorize(token)?;
        let playlists = self.playlists.read().await;
        let mut listed: Vec<Playlist> = playlists
            .values()
            .map(|stored| Playlist {
                tracks_total: u32::try_from(stored.uris.len()).ok(),
                ..stored.playlist.clone()
            })
            .collect();
        listed.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(listed)
    }

    async fn current_user(&self, token: &AccessToken) -> ProviderResult<CatalogUser> {
        Self::authorize(token)?;
        Ok(CatalogUser {
            id: DEMO_USER_ID.to_owned(),
            display_name: Some("Demo Runner".to_owned()),
        })
    }

    async fn create_playlist(
        &self,
        token: &AccessToken,
        user_id: &str,
        name: &str,
        _description: &str,
    ) -> ProviderResult<Playlist> {
        Self::authorize(token)?;
        let mut playlists = self.playlists.write().await;
        let id = format!("demo-playlist-{}", playlists.len());
        let playlist = Playlist {
            id: id.clone(),
            name: name.to_owned(),
            uri: format!("spotify:playlist:{id}"),
            tracks_total: Some(0),
        };
        playlists.insert(
            id,
            StoredPlaylist {
                playlist: playlist.clone(),
                uris: Vec::new(),
            },
        );
        info!(user_id, playlist_id = %playlist.id, "Created demo playlist");
        Ok(playlist)
    }

    async fn add_tracks(
        &self,
        token: &AccessToken,
        playlist_id: &str,
        uris: &[String],
    ) -> ProviderResult<usize> {
        Self::authorize(token)?;
        let mut playlists = self.playlists.write().await;
        let stored = playlists
            .get_mut(playlist_id)
            .ok_or_else(|| ProviderError::NotFound {
                provider: service_names::DEMO_CATALOG.to_owned(),
                resource_type: "playlist".to_owned(),
                resource_id: playlist_id.to_owned(),
            })?;
        stored.uris.extend_from_slice(uris);
        Ok(uris.len())
    }
}
