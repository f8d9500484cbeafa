// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Filter and playlist operations over the music catalog, independent of axum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers parse the request and extract the bearer token; everything
//! after that lives here so it can be exercised without an HTTP stack.

/// Cadence filtering: request validation, pool fetching and matching
pub mod filter;

/// Playlist creation and listing
pub mod playlists;
