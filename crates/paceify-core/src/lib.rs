// ABOUTME: Core types and constants for the Paceify cadence matching service
// ABOUTME: Foundation crate with error handling, track and pace models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Paceify Core
//!
//! Foundation crate providing shared types and constants for Paceify. The
//! tempo engine, the catalog providers and the HTTP server all build on it,
//! so it is kept small and free of I/O.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ProviderError`
//! - **constants**: Cadence, catalog and OAuth constants organized by domain
//! - **models**: `Track`, `Pace`, `Playlist` and catalog user types

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (tracks, paces, playlists)
pub mod models;
