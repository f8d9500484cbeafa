// ABOUTME: Core data models shared by the tempo engine, catalogs and HTTP layer
// ABOUTME: Tracks with audio features, running paces, playlists and catalog users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models
//!
//! Tracks are fetched per request and only ever held in memory; nothing here
//! is persisted.

mod pace;
mod playlist;
mod track;

pub use pace::Pace;
pub use playlist::{CatalogUser, Playlist};
pub use track::{AudioFeatures, Track};
