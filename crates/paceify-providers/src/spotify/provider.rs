// ABOUTME: Spotify Web API catalog with paging, audio-feature batching and playlist writes
// ABOUTME: Maps Spotify error statuses onto ProviderError behind a circuit breaker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::{debug, error, info, instrument};
use urlencoding::encode;

use super::dto::{
    AddTracksBody, AudioFeaturesResponse, CreatePlaylistBody, ErrorEnvelope, Paging,
    RecommendationsResponse, SpotifyPlaylist, SpotifyTrack, SpotifyUser, TrackItem,
};
use crate::circuit_breaker::CircuitBreaker;
use crate::constants::service_names;
use crate::constants::spotify::{
    API_BASE_URL, AUDIO_FEATURES_BATCH_SIZE, DEFAULT_RECOMMENDATION_LIMIT,
    MAX_RECOMMENDATION_LIMIT, PLAYLIST_ADD_BATCH_SIZE, PLAYLIST_TRACKS_MAX_PAGES,
    PLAYLIST_TRACKS_PAGE_SIZE, SAVED_TRACKS_MAX_PAGES, SAVED_TRACKS_PAGE_SIZE,
};
use crate::core::{AccessToken, MusicCatalog, RecommendationQuery, RecommendationSeeds};
use crate::errors::provider::{ProviderError, ProviderResult};
use crate::http_client::shared_client;
use crate::models::{AudioFeatures, CatalogUser, Playlist, Track};

/// Seconds to wait on a 429 without a `Retry-After` header
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// User playlists page size
const USER_PLAYLISTS_PAGE_SIZE: u32 = 50;

/// User playlists page cap
const USER_PLAYLISTS_MAX_PAGES: u32 = 10;

/// Endpoint and paging settings for the Spotify catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyConfig {
    /// Web API root, without trailing slash
    pub api_base_url: String,
    /// Page size for `/me/tracks`
    pub saved_tracks_page_size: u32,
    /// Page cap for `/me/tracks`
    pub saved_tracks_max_pages: u32,
    /// Page size for `/playlists/{id}/tracks`
    pub playlist_tracks_page_size: u32,
    /// Page cap for `/playlists/{id}/tracks`
    pub playlist_tracks_max_pages: u32,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_owned(),
            saved_tracks_page_size: SAVED_TRACKS_PAGE_SIZE,
            saved_tracks_max_pages: SAVED_TRACKS_MAX_PAGES,
            playlist_tracks_page_size: PLAYLIST_TRACKS_PAGE_SIZE,
            playlist_tracks_max_pages: PLAYLIST_TRACKS_MAX_PAGES,
        }
    }
}

/// Spotify Web API catalog
pub struct SpotifyCatalog {
    config: SpotifyConfig,
    client: Client,
    circuit_breaker: CircuitBreaker,
}

impl Default for SpotifyCatalog {
    fn default() -> Self {
        Self::new(SpotifyConfig::default())
    }
}

impl SpotifyCatalog {
    /// Create a catalog over the shared HTTP client
    #[must_use]
    pub fn new(config: SpotifyConfig) -> Self {
        Self::with_client(config, shared_client().clone())
    }

    /// Create a catalog over a specific HTTP client
    #[must_use]
    pub fn with_client(config: SpotifyConfig, client: Client) -> Self {
        Self {
            config,
            client,
            circuit_breaker: CircuitBreaker::new(service_names::SPOTIFY),
        }
    }

    /// Breaker guarding this catalog
    #[must_use]
    pub const fn circuit_breaker(&self) -> &CircuitBreaker {
        &self.circuit_breaker
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Send an authenticated request through the circuit breaker and decode JSON
    async fn send<T>(&self, token: &AccessToken, request: RequestBuilder) -> ProviderResult<T>
    where
        T: DeserializeOwned,
    {
        self.circuit_breaker.check()?;
        let result = Self::execute(token, request).await;
        self.circuit_breaker.record(&result);
        result
    }

    async fn execute<T>(token: &AccessToken, request: RequestBuilder) -> ProviderResult<T>
    where
        T: DeserializeOwned,
    {
        let response = request
            .header(header::AUTHORIZATION, format!("Bearer {}", token.secret()))
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "Spotify API response");

        if !status.is_success() {
            return Err(Self::handle_api_error(response).await);
        }

        response.json().await.map_err(|e| ProviderError::ParseError {
            provider: service_names::SPOTIFY.to_owned(),
            details: e.to_string(),
        })
    }

    /// Turn a non-success response into a `ProviderError`
    async fn handle_api_error(response: Response) -> ProviderError {
        let status = response.status();
        let retry_after_secs = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        let text = response.text().await.unwrap_or_default();
        Self::classify_error(status, retry_after_secs, &text)
    }

    fn classify_error(status: StatusCode, retry_after_secs: u64, text: &str) -> ProviderError {
        let message = serde_json::from_str::<ErrorEnvelope>(text)
            .map(|envelope| envelope.error.into_message())
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_owned()
            });

        error!(
            status = status.as_u16(),
            body_length = text.len(),
            %message,
            "Spotify API request failed"
        );

        match status {
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded {
                provider: service_names::SPOTIFY.to_owned(),
                retry_after_secs,
                limit_type: "API rate limit".to_owned(),
            },
            StatusCode::UNAUTHORIZED => ProviderError::AuthenticationFailed {
                provider: service_names::SPOTIFY.to_owned(),
                reason: message,
            },
            _ => ProviderError::ApiError {
                provider: service_names::SPOTIFY.to_owned(),
                status_code: status.as_u16(),
                message: format!("Spotify API error ({}): {message}", status.as_u16()),
                retryable: status.is_server_error(),
            },
        }
    }

    /// Follow `next` links from `first`, stopping after `max_pages`
    async fn paginate<T>(
        &self,
        token: &AccessToken,
        first: RequestBuilder,
        max_pages: u32,
    ) -> ProviderResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut request = Some(first);
        let mut pages = 0;

        while let Some(current) = request.take() {
            if pages >= max_pages {
                break;
            }
            let page: Paging<T> = self.send(token, current).await?;
            items.extend(page.items);
            pages += 1;
            request = page.next.map(|next| self.client.get(next));
        }

        debug!(pages, items = items.len(), "Spotify pagination finished");
        Ok(items)
    }

    /// Audio features keyed by track id, fetched in batches
    async fn audio_features(
        &self,
        token: &AccessToken,
        ids: &[&str],
    ) -> ProviderResult<HashMap<String, AudioFeatures>> {
        let mut features = HashMap::with_capacity(ids.len());
        for chunk in ids.chunks(AUDIO_FEATURES_BATCH_SIZE) {
            let request = self
                .client
                .get(self.url("audio-features"))
                .query(&[("ids", chunk.join(","))]);
            let response: AudioFeaturesResponse = self.send(token, request).await?;
            features.extend(
                response
                    .audio_features
                    .into_iter()
                    .flatten()
                    .filter_map(|entry| entry.into_features()),
            );
        }
        Ok(features)
    }

    /// Convert raw tracks and attach tempo where Spotify has analysis
    async fn with_features(
        &self,
        token: &AccessToken,
        raw: Vec<SpotifyTrack>,
    ) -> ProviderResult<Vec<Track>> {
        let tracks: Vec<Track> = raw.into_iter().filter_map(SpotifyTrack::into_track).collect();
        let ids: Vec<&str> = tracks.iter().map(|track| track.id.as_str()).collect();
        let mut features = self.audio_features(token, &ids).await?;

        let enriched: Vec<Track> = tracks
            .into_iter()
            .map(|track| match features.remove(&track.id) {
                Some(analysis) => track.with_features(analysis),
                None => track,
            })
            .collect();

        let missing = enriched.iter().filter(|track| track.tempo.is_none()).count();
        if missing > 0 {
            debug!(missing, "Tracks without tempo analysis kept unmatched");
        }
        Ok(enriched)
    }

    fn recommendation_params(query: &RecommendationQuery) -> Vec<(&'static str, String)> {
        let limit = if query.limit == 0 {
            DEFAULT_RECOMMENDATION_LIMIT
        } else {
            query.limit.min(MAX_RECOMMENDATION_LIMIT)
        };
        let mut params = vec![("limit", limit.to_string())];

        match &query.seeds {
            RecommendationSeeds::Tracks(ids) => params.push(("seed_tracks", ids.join(","))),
            RecommendationSeeds::Genres(genres) => params.push(("seed_genres", genres.join(","))),
        }

        // Spotify rejects non-positive tempo bounds
        for (key, value) in [
            ("target_tempo", query.target_tempo),
            ("min_tempo", query.min_tempo),
            ("max_tempo", query.max_tempo),
        ] {
            if value > 0.0 {
                params.push((key, value.to_string()));
            }
        }
        params
    }

    async fn post<B, T>(&self, token: &AccessToken, path: &str, body: &B) -> ProviderResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        self.send(token, request).await
    }
}

#[async_trait]
impl MusicCatalog for SpotifyCatalog {
    fn name(&self) -> &'static str {
        service_names::SPOTIFY
    }

    #[instrument(skip(self, token), fields(catalog = "spotify", api_call = "saved_tracks"))]
    async fn saved_tracks(&self, token: &AccessToken) -> ProviderResult<Vec<Track>> {
        let first = self
            .client
            .get(self.url("me/tracks"))
            .query(&[("limit", self.config.saved_tracks_page_size)]);
        let items: Vec<TrackItem> = self
            .paginate(token, first, self.config.saved_tracks_max_pages)
            .await?;
        let tracks = self
            .with_features(token, items.into_iter().filter_map(|item| item.track).collect())
            .await?;
        info!(count = tracks.len(), "Fetched saved tracks");
        Ok(tracks)
    }

    #[instrument(skip(self, token), fields(catalog = "spotify", api_call = "playlist_tracks"))]
    async fn playlist_tracks(
        &self,
        token: &AccessToken,
        playlist_id: &str,
    ) -> ProviderResult<Vec<Track>> {
        let first = self
            .client
            .get(self.url(&format!("playlists/{}/tracks", encode(playlist_id))))
            .query(&[("limit", self.config.playlist_tracks_page_size)]);
        let items: Vec<TrackItem> = self
            .paginate(token, first, self.config.playlist_tracks_max_pages)
            .await?;
        let tracks = self
            .with_features(token, items.into_iter().filter_map(|item| item.track).collect())
            .await?;
        info!(count = tracks.len(), "Fetched playlist tracks");
        Ok(tracks)
    }

    #[instrument(
        skip(self, token, query),
        fields(
            catalog = "spotify",
            api_call = "recommendations",
            target_tempo = query.target_tempo,
            limit = query.limit,
        )
    )]
    async fn recommendations(
        &self,
        token: &AccessToken,
        query: &RecommendationQuery,
    ) -> ProviderResult<Vec<Track>> {
        let request = self
            .client
            .get(self.url("recommendations"))
            .query(&Self::recommendation_params(query));
        let response: RecommendationsResponse = self.send(token, request).await?;
        let tracks = self.with_features(token, response.tracks).await?;
        info!(count = tracks.len(), "Fetched recommendations");
        Ok(tracks)
    }

    #[instrument(skip(self, token), fields(catalog = "spotify", api_call = "user_playlists"))]
    async fn user_playlists(&self, token: &AccessToken) -> ProviderResult<Vec<Playlist>> {
        let first = self
            .client
            .get(self.url("me/playlists"))
            .query(&[("limit", USER_PLAYLISTS_PAGE_SIZE)]);
        let playlists: Vec<SpotifyPlaylist> =
            self.paginate(token, first, USER_PLAYLISTS_MAX_PAGES).await?;
        Ok(playlists.into_iter().map(Playlist::from).collect())
    }

    #[instrument(skip(self, token), fields(catalog = "spotify", api_call = "current_user"))]
    async fn current_user(&self, token: &AccessToken) -> ProviderResult<CatalogUser> {
        let user: SpotifyUser = self.send(token, self.client.get(self.url("me"))).await?;
        Ok(user.into())
    }

    #[instrument(skip(self, token, description), fields(catalog = "spotify", api_call = "create_playlist"))]
    async fn create_playlist(
        &self,
        token: &AccessToken,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> ProviderResult<Playlist> {
        let body = CreatePlaylistBody {
            name,
            description,
            public: false,
        };
        let playlist: SpotifyPlaylist = self
            .post(token, &format!("users/{}/playlists", encode(user_id)), &body)
            .await?;
        info!(playlist_id = %playlist.id, "Created playlist");
        Ok(playlist.into())
    }

    #[instrument(
        skip(self, token, uris),
        fields(catalog = "spotify", api_call = "add_tracks", count = uris.len())
    )]
    async fn add_tracks(
        &self,
        token: &AccessToken,
        playlist_id: &str,
        uris: &[String],
    ) -> ProviderResult<usize> {
        let path = format!("playlists/{}/tracks", encode(playlist_id));
        for chunk in uris.chunks(PLAYLIST_ADD_BATCH_SIZE) {
            let _: IgnoredAny = self.post(token, &path, &AddTracksBody { uris: chunk }).await?;
        }
        Ok(uris.len())
    }
}
