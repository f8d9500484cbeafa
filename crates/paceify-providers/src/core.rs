// ABOUTME: Core catalog trait and request types shared by all music catalogs
// ABOUTME: Credentials are explicit per call; recommendation seeds are a closed sum type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use async_trait::async_trait;

use crate::constants::spotify::{DEFAULT_RECOMMENDATION_LIMIT, MAX_RECOMMENDATION_SEEDS};
use crate::errors::provider::ProviderResult;
use crate::models::{CatalogUser, Playlist, Track};

/// Bearer token issued by the catalog's OAuth server
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token for the `Authorization` header
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// What a recommendation request is seeded with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationSeeds {
    /// Up to five catalog track ids
    Tracks(Vec<String>),
    /// Genre names, used when there are no seed tracks
    Genres(Vec<String>),
}

impl RecommendationSeeds {
    /// Seed from the first tracks of a pool, or from `default_genres` when the pool is empty
    #[must_use]
    pub fn from_pool(pool: &[Track], default_genres: &[String]) -> Self {
        let ids: Vec<String> = pool
            .iter()
            .take(MAX_RECOMMENDATION_SEEDS)
            .map(|track| track.id.clone())
            .collect();
        if ids.is_empty() {
            Self::Genres(default_genres.to_vec())
        } else {
            Self::Tracks(ids)
        }
    }
}

/// Parameters for a recommendation lookup
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    /// Seeds
    pub seeds: RecommendationSeeds,
    /// Preferred tempo
    pub target_tempo: f64,
    /// Lowest acceptable tempo
    pub min_tempo: f64,
    /// Highest acceptable tempo
    pub max_tempo: f64,
    /// Maximum number of tracks to return
    pub limit: u32,
}

impl RecommendationQuery {
    /// Query centred on `target_tempo` within `[min_tempo, max_tempo]`
    #[must_use]
    pub const fn new(seeds: RecommendationSeeds, target_tempo: f64, min_tempo: f64, max_tempo: f64) -> Self {
        Self {
            seeds,
            target_tempo,
            min_tempo,
            max_tempo,
            limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }

    /// Override the result limit
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// A music catalog the tempo engine can draw tracks from
///
/// Implementations hold no per-user state; the caller's token is passed to
/// every call.
#[async_trait]
pub trait MusicCatalog: Send + Sync {
    /// Catalog identifier for logs and errors
    fn name(&self) -> &'static str;

    /// The user's saved library, with tempo attached where the catalog has it
    async fn saved_tracks(&self, token: &AccessToken) -> ProviderResult<Vec<Track>>;

    /// Tracks of one playlist, with tempo attached where the catalog has it
    async fn playlist_tracks(&self, token: &AccessToken, playlist_id: &str) -> ProviderResult<Vec<Track>>;

    /// Recommended tracks for the query, flagged by the caller as recommendations
    async fn recommendations(
        &self,
        token: &AccessToken,
        query: &RecommendationQuery,
    ) -> ProviderResult<Vec<Track>>;

    /// Playlists owned or followed by the user
    async fn user_playlists(&self, token: &AccessToken) -> ProviderResult<Vec<Playlist>>;

    /// The account the token belongs to
    async fn current_user(&self, token: &AccessToken) -> ProviderResult<CatalogUser>;

    /// Create a private playlist for `user_id`
    async fn create_playlist(
        &self,
        token: &AccessToken,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> ProviderResult<Playlist>;

    /// Append tracks to a playlist, returning how many were added
    async fn add_tracks(
        &self,
        token: &AccessToken,
        playlist_id: &str,
        uris: &[String],
    ) -> ProviderResult<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(count: usize) -> Vec<Track> {
        (0..count)
            .map(|i| Track::new(format!("t{i}"), "song", vec![], "album", 1))
            .collect()
    }

    #[test]
    fn test_seeds_take_at_most_five_tracks() {
        let genres = vec!["pop".to_owned()];
        match RecommendationSeeds::from_pool(&pool(8), &genres) {
            RecommendationSeeds::Tracks(ids) => {
                assert_eq!(ids, vec!["t0", "t1", "t2", "t3", "t4"]);
            }
            RecommendationSeeds::Genres(_) => panic!("expected track seeds"),
        }
    }

    #[test]
    fn test_empty_pool_falls_back_to_genres() {
        let genres = vec!["pop".to_owned(), "rock".to_owned()];
        assert_eq!(
            RecommendationSeeds::from_pool(&[], &genres),
            RecommendationSeeds::Genres(genres)
        );
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AccessToken::new("BQD-secret");
        assert_eq!(format!("{token:?}"), "AccessToken(***)");
        assert_eq!(token.secret(), "BQD-secret");
    }
}
