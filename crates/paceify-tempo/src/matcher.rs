// ABOUTME: Tempo window matching over a primary pool with gated fallback pool
// ABOUTME: Stable, inclusive filtering; fallback only consulted when primary has no match
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::future::Future;

use paceify_core::models::{Pace, Track};
use serde::Serialize;
use tracing::info;

use crate::request::ResolvedCadence;

/// Inclusive tempo range `[target - tolerance, target + tolerance]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TempoWindow {
    min: f64,
    max: f64,
}

impl TempoWindow {
    /// Window centred on `target`
    #[must_use]
    pub fn around(target: f64, tolerance: f64) -> Self {
        Self {
            min: target - tolerance,
            max: target + tolerance,
        }
    }

    /// Lower bound, inclusive
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound, inclusive
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Whether a tempo lies inside the window
    #[must_use]
    pub fn contains(&self, tempo: f64) -> bool {
        self.min <= tempo && tempo <= self.max
    }
}

impl fmt::Display for TempoWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Pool a matched track came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackSource {
    /// The user's own library or chosen playlist
    Library,
    /// Catalog recommendations
    Recommendation,
}

/// A track that fell inside the window
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedTrack {
    /// The track
    pub track: Track,
    /// Its tempo, known to be inside the window
    pub tempo: f64,
    /// Originating pool
    pub source: TrackSource,
}

impl MatchedTrack {
    /// Whether the track was added from recommendations
    #[must_use]
    pub fn is_recommended(&self) -> bool {
        self.source == TrackSource::Recommendation
    }
}

/// Outcome of matching a cadence target against the pools
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Target steps per minute
    pub target_cadence: f64,
    /// Pace the target was derived from
    pub original_pace: Option<Pace>,
    /// Half-width of the window
    pub tolerance: f64,
    /// Window used for both pools
    pub window: TempoWindow,
    /// Primary pool size before tempo exclusion
    pub total_candidates: usize,
    /// Primary pool tracks inside the window
    pub primary_matches: usize,
    /// Fallback tracks used; zero whenever the primary pool matched
    pub fallback_added: usize,
    /// Final ordered tracks, from exactly one pool
    pub tracks: Vec<MatchedTrack>,
}

/// Keep the tracks of `pool` whose tempo lies in `window`, preserving order
///
/// Tracks without tempo are dropped.
#[must_use]
pub fn filter_pool(window: TempoWindow, pool: Vec<Track>, source: TrackSource) -> Vec<MatchedTrack> {
    pool.into_iter()
        .filter_map(|track| {
            let tempo = track.tempo.filter(|&tempo| window.contains(tempo))?;
            Some(MatchedTrack {
                track,
                tempo,
                source,
            })
        })
        .collect()
}

/// Match both pools when the fallback pool is already in hand
#[must_use]
pub fn match_tracks(
    target: &ResolvedCadence,
    tolerance: f64,
    primary: Vec<Track>,
    fallback: Vec<Track>,
) -> MatchResult {
    let window = TempoWindow::around(target.cadence, tolerance);
    let total_candidates = primary.len();
    let matched = filter_pool(window, primary, TrackSource::Library);
    let fallback = if matched.is_empty() {
        filter_pool(window, fallback, TrackSource::Recommendation)
    } else {
        Vec::new()
    };
    assemble(target, tolerance, window, total_candidates, matched, fallback)
}

/// Match the primary pool and fetch the fallback pool only if nothing matched
///
/// `fetch_fallback` receives the window so the fetch can be constrained to it.
///
/// # Errors
///
/// Propagates the error of `fetch_fallback`; it is never called when the
/// primary pool has a match.
pub async fn match_tracks_with<F, Fut, E>(
    target: &ResolvedCadence,
    tolerance: f64,
    primary: Vec<Track>,
    fetch_fallback: F,
) -> Result<MatchResult, E>
where
    F: FnOnce(TempoWindow) -> Fut,
    Fut: Future<Output = Result<Vec<Track>, E>>,
{
    let window = TempoWindow::around(target.cadence, tolerance);
    let total_candidates = primary.len();
    let matched = filter_pool(window, primary, TrackSource::Library);
    let fallback = if matched.is_empty() {
        info!(window = %window, "No library tracks in window, consulting recommendations");
        filter_pool(window, fetch_fallback(window).await?, TrackSource::Recommendation)
    } else {
        Vec::new()
    };
    Ok(assemble(
        target,
        tolerance,
        window,
        total_candidates,
        matched,
        fallback,
    ))
}

fn assemble(
    target: &ResolvedCadence,
    tolerance: f64,
    window: TempoWindow,
    total_candidates: usize,
    matched: Vec<MatchedTrack>,
    fallback: Vec<MatchedTrack>,
) -> MatchResult {
    let primary_matches = matched.len();
    let fallback_added = fallback.len();
    let tracks = if matched.is_empty() { fallback } else { matched };

    info!(
        cadence = target.cadence,
        window = %window,
        total_candidates,
        primary_matches,
        fallback_added,
        "Tempo match complete"
    );

    MatchResult {
        target_cadence: target.cadence,
        original_pace: target.pace,
        tolerance,
        window,
        total_candidates,
        primary_matches,
        fallback_added,
        tracks,
    }
}
