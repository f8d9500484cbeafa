// ABOUTME: HTTP tests for playlist listing and creation over the in-memory demo catalog
// ABOUTME: Verifies token checks, URI validation, default naming and reuse of created playlists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use paceify::server::build_router;
use serde_json::{json, Value};

const TOKEN: &str = "demo-token";

#[tokio::test]
async fn test_create_playlist_and_filter_it() {
    let app = build_router(common::demo_resources());

    let response = AxumTestRequest::post("/playlists/create")
        .bearer(TOKEN)
        .json(&json!({
            "name": "Tempo Run",
            "trackUris": ["spotify:track:track1", "spotify:track:track3"]
        }))
        .send(app.clone())
        .await;

    assert_eq!(response.status(), 200);
    let created: Value = response.json();
    assert_eq!(created["id"], "demo-playlist-1");
    assert_eq!(created["name"], "Tempo Run");
    assert_eq!(created["uri"], "spotify:playlist:demo-playlist-1");
    assert_eq!(created["tracksCount"], 2);

    let response = AxumTestRequest::post("/filter")
        .bearer(TOKEN)
        .json(&json!({ "targetCadence": 120, "playlistId": "demo-playlist-1" }))
        .send(app)
        .await;
    let body: Value = response.json();
    assert_eq!(body["totalTracks"], 2);
    assert_eq!(body["filteredCount"], 2);
}

#[tokio::test]
async fn test_blank_name_uses_default() {
    let response = AxumTestRequest::post("/playlists/create")
        .bearer(TOKEN)
        .json(&json!({ "name": "   ", "trackUris": ["spotify:track:track2"] }))
        .send(common::demo_app())
        .await;

    let created: Value = response.json();
    assert_eq!(created["name"], "Paceify Running Mix");
}

#[tokio::test]
async fn test_empty_uris_rejected() {
    let response = AxumTestRequest::post("/playlists/create")
        .bearer(TOKEN)
        .json(&json!({ "name": "Nothing", "trackUris": [] }))
        .send(common::demo_app())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert_eq!(body["error"]["message"], "No track URIs provided");
}

#[tokio::test]
async fn test_create_requires_token_before_body() {
    let response = AxumTestRequest::post("/playlists/create")
        .json(&json!({ "trackUris": [] }))
        .send(common::demo_app())
        .await;

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_list_playlists() {
    let app = build_router(common::demo_resources());
    AxumTestRequest::post("/playlists/create")
        .bearer(TOKEN)
        .json(&json!({ "name": "Easy", "trackUris": ["spotify:track:track4"] }))
        .send(app.clone())
        .await;

    let response = AxumTestRequest::get("/playlists")
        .bearer(TOKEN)
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    let playlists = body["playlists"].as_array().unwrap();
    assert_eq!(playlists.len(), 2);
    assert_eq!(playlists[0]["id"], "demo-library");
    assert_eq!(playlists[0]["tracksTotal"], 5);
    assert_eq!(playlists[1]["name"], "Easy");
    assert_eq!(playlists[1]["tracksTotal"], 1);
}

#[tokio::test]
async fn test_list_requires_token() {
    let response = AxumTestRequest::get("/playlists")
        .header("authorization", "Basic abc")
        .send(common::demo_app())
        .await;

    assert_eq!(response.status(), 401);
}
