// ABOUTME: Cadence estimation and tempo matching engine for running playlists
// ABOUTME: Converts paces to cadence targets and filters track pools by tempo window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Paceify Tempo
//!
//! The engine behind `/filter`. Everything here is synchronous and free of
//! shared state, so it can be called concurrently without coordination.
//!
//! - [`estimator`] turns a pace (minutes and seconds per mile) into a cadence
//!   using a speed-dependent stride length.
//! - [`matcher`] builds the inclusive tempo window around that cadence, filters
//!   the primary pool and consults the fallback pool only when the primary pool
//!   has no match.
//! - [`report`] shapes a [`matcher::MatchResult`] into the wire response.

/// Stride table and tempo configuration
pub mod config;
/// Pace to cadence estimation
pub mod estimator;
/// Tempo window filtering with fallback
pub mod matcher;
/// Pace to cadence conversion table
pub mod pace_table;
/// Wire representation of match results
pub mod report;
/// Cadence request resolution
pub mod request;

pub use config::{ConfigError, StrideBand, StrideTable, TempoConfig};
pub use estimator::{estimate_cadence, CadenceEstimate, CadenceEstimator};
pub use matcher::{
    filter_pool, match_tracks, match_tracks_with, MatchResult, MatchedTrack, TempoWindow,
    TrackSource,
};
pub use pace_table::{PaceConversion, PaceTable};
pub use report::{FilterReport, TrackSummary};
pub use request::{CadenceRequest, ResolvedCadence};
