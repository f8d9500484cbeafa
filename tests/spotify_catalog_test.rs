// ABOUTME: Integration tests for the Spotify catalog against an in-process fake Web API
// ABOUTME: Covers paging caps, audio-feature enrichment, error mapping, recommendations and playlist writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fake_upstream::{FakeSpotify, EXPIRED_TOKEN, RETRY_AFTER_SECS, THROTTLED_TOKEN};
use paceify_core::errors::{AppError, ErrorCode};
use paceify_providers::{
    AccessToken, CircuitState, MusicCatalog, ProviderError, RecommendationQuery,
    RecommendationSeeds, SpotifyCatalog, SpotifyConfig,
};
use reqwest::Client;

fn catalog(fake: &FakeSpotify, page_size: u32, max_pages: u32) -> SpotifyCatalog {
    SpotifyCatalog::with_client(
        SpotifyConfig {
            api_base_url: fake.base_url.clone(),
            saved_tracks_page_size: page_size,
            saved_tracks_max_pages: max_pages,
            ..SpotifyConfig::default()
        },
        Client::new(),
    )
}

fn token() -> AccessToken {
    AccessToken::new("valid-token")
}

#[tokio::test]
async fn test_saved_tracks_follow_next_links_and_attach_tempo() {
    let fake = FakeSpotify::start().await;
    let catalog = catalog(&fake, 2, 5);

    let tracks = catalog.saved_tracks(&token()).await.unwrap();

    let ids: Vec<&str> = tracks.iter().map(|track| track.id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "s2", "s3"]);
    assert_eq!(tracks[0].tempo, Some(170.2));
    assert_eq!(tracks[0].uri.as_deref(), Some("spotify:track:s1"));
    assert_eq!(tracks[1].artists, vec!["Tempo Trio", "Guest"]);
    assert_eq!(tracks[2].tempo, None);

    assert_eq!(fake.count("/me/tracks"), 2);
    fake.with_recorded(|recorded| {
        assert!(recorded
            .requests
            .contains(&"/audio-features?ids=s1,s2,s3".to_owned()));
    });
}

#[tokio::test]
async fn test_saved_tracks_stop_at_page_cap() {
    let fake = FakeSpotify::start().await;
    let catalog = catalog(&fake, 2, 1);

    let tracks = catalog.saved_tracks(&token()).await.unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(fake.count("/me/tracks"), 1);
}

#[tokio::test]
async fn test_expired_token_maps_to_auth_failure() {
    let fake = FakeSpotify::start().await;
    let catalog = catalog(&fake, 50, 5);

    let error = catalog
        .saved_tracks(&AccessToken::new(EXPIRED_TOKEN))
        .await
        .unwrap_err();

    match &error {
        ProviderError::AuthenticationFailed { reason, .. } => {
            assert_eq!(reason, "The access token expired");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(AppError::from(error).code, ErrorCode::ExternalAuthFailed);
    assert_eq!(catalog.circuit_breaker().state(), CircuitState::Closed);
    assert_eq!(catalog.circuit_breaker().failure_count(), 0);
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after() {
    let fake = FakeSpotify::start().await;
    let catalog = catalog(&fake, 50, 5);

    let error = catalog
        .current_user(&AccessToken::new(THROTTLED_TOKEN))
        .await
        .unwrap_err();

    assert_eq!(error.retry_after_secs(), Some(RETRY_AFTER_SECS));
    let app_error = AppError::from(error);
    assert_eq!(app_error.http_status(), 429);
    assert_eq!(app_error.context.details["retry_after_secs"], RETRY_AFTER_SECS);
}

#[tokio::test]
async fn test_recommendations_send_tempo_window() {
    let fake = FakeSpotify::start().await;
    let catalog = catalog(&fake, 50, 5);
    let query = RecommendationQuery::new(
        RecommendationSeeds::Tracks(vec!["s1".to_owned(), "s2".to_owned()]),
        168.0,
        158.0,
        178.0,
    )
    .with_limit(30);

    let tracks = catalog.recommendations(&token(), &query).await.unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].tempo, Some(165.0));
    fake.with_recorded(|recorded| {
        let params = &recorded.recommendation_query;
        assert_eq!(params["seed_tracks"], "s1,s2");
        assert_eq!(params["target_tempo"], "168");
        assert_eq!(params["min_tempo"], "158");
        assert_eq!(params["max_tempo"], "178");
        assert_eq!(params["limit"], "30");
        assert!(!params.contains_key("seed_genres"));
    });
}

#[tokio::test]
async fn test_genre_seeds_when_pool_is_empty() {
    let fake = FakeSpotify::start().await;
    let catalog = catalog(&fake, 50, 5);
    let seeds = RecommendationSeeds::from_pool(&[], &["pop".to_owned(), "rock".to_owned()]);

    catalog
        .recommendations(&token(), &RecommendationQuery::new(seeds, 170.0, 160.0, 180.0))
        .await
        .unwrap();

    fake.with_recorded(|recorded| {
        assert_eq!(recorded.recommendation_query["seed_genres"], "pop,rock");
        assert_eq!(recorded.recommendation_query["limit"], "20");
    });
}

#[tokio::test]
async fn test_playlist_tracks_and_missing_playlist() {
    let fake = FakeSpotify::start().await;
    let catalog = catalog(&fake, 50, 5);

    let tracks = catalog.playlist_tracks(&token(), "pl-1").await.unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].tempo, Some(150.0));

    let error = catalog.playlist_tracks(&token(), "pl-x").await.unwrap_err();
    assert!(matches!(
        error,
        ProviderError::ApiError {
            status_code: 404,
            retryable: false,
            ..
        }
    ));
    assert_eq!(AppError::from(error).http_status(), 404);
}

#[tokio::test]
async fn test_user_playlists() {
    let fake = FakeSpotify::start().await;
    let catalog = catalog(&fake, 50, 5);

    let playlists = catalog.user_playlists(&token()).await.unwrap();

    assert_eq!(playlists.len(), 2);
    assert_eq!(playlists[0].name, "Long Run");
    assert_eq!(playlists[0].tracks_total, Some(1));
    assert_eq!(playlists[1].tracks_total, None);
    fake.with_recorded(|recorded| {
        assert!(recorded
            .requests
            .contains(&"/me/playlists?limit=50".to_owned()));
    });
}

#[tokio::test]
async fn test_create_private_playlist_and_add_in_batches() {
    let fake = FakeSpotify::start().await;
    let catalog = catalog(&fake, 50, 5);
    let uris: Vec<String> = (0..150).map(|i| format!("spotify:track:t{i}")).collect();

    let user = catalog.current_user(&token()).await.unwrap();
    assert_eq!(user.id, "runner-1");

    let playlist = catalog
        .create_playlist(&token(), &user.id, "Tempo Run", "")
        .await
        .unwrap();
    assert_eq!(playlist.id, "pl-new");
    assert_eq!(playlist.name, "Tempo Run");

    let added = catalog
        .add_tracks(&token(), &playlist.id, &uris)
        .await
        .unwrap();
    assert_eq!(added, 150);

    fake.with_recorded(|recorded| {
        let body = recorded.created_playlist.as_ref().unwrap();
        assert_eq!(body["public"], false);
        assert!(recorded
            .requests
            .contains(&"/users/runner-1/playlists?".to_owned()));
        let sizes: Vec<usize> = recorded
            .added_batches
            .iter()
            .map(|(_, batch)| batch.len())
            .collect();
        assert_eq!(sizes, vec![100, 50]);
        assert_eq!(recorded.added_batches[1].1[0], "spotify:track:t100");
    });
}

#[tokio::test]
async fn test_unreachable_api_counts_toward_breaker() {
    let catalog = SpotifyCatalog::with_client(
        SpotifyConfig {
            api_base_url: "http://127.0.0.1:9/v1".to_owned(),
            ..SpotifyConfig::default()
        },
        Client::new(),
    );

    let error = catalog.current_user(&token()).await.unwrap_err();

    assert!(matches!(error, ProviderError::NetworkError(_)));
    assert_eq!(catalog.circuit_breaker().failure_count(), 1);
}
