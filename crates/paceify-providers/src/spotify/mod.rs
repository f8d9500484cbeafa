// ABOUTME: Spotify Web API catalog module
// ABOUTME: Response DTOs and the catalog implementation over the REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod dto;
mod provider;

pub use provider::{SpotifyCatalog, SpotifyConfig};
