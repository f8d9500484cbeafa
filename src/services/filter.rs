// ABOUTME: Filter business logic: validates the request, fetches pools and runs the tempo matcher
// ABOUTME: Recommendations are fetched only when the primary pool has no track in the window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use paceify_providers::{AccessToken, MusicCatalog, RecommendationQuery, RecommendationSeeds};
use paceify_tempo::{match_tracks_with, CadenceEstimator, CadenceRequest, FilterReport};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::models::Pace;

/// Body of `POST /filter`
///
/// Pace fields win over `targetCadence` when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    /// Whole minutes per mile
    pub pace_minutes: Option<u32>,
    /// Extra seconds per mile (0-59)
    pub pace_seconds: Option<u32>,
    /// Stride length overriding the speed table, in feet
    pub stride_length_feet: Option<f64>,
    /// Cadence target in steps per minute
    pub target_cadence: Option<f64>,
    /// Half-width of the tempo window
    pub tolerance: Option<f64>,
    /// Playlist to use as the primary pool instead of the saved library
    pub playlist_id: Option<String>,
}

impl FilterRequest {
    /// Resolve the body into a pace or a direct cadence
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` with example payloads when neither
    /// `paceMinutes >= 1` nor `targetCadence >= 1` is supplied, and
    /// `VALUE_OUT_OF_RANGE` for seconds above 59 or a non-positive stride
    pub fn cadence_request(&self) -> AppResult<CadenceRequest> {
        if let Some(minutes) = self.pace_minutes.filter(|&minutes| minutes >= 1) {
            let pace = Pace::new(minutes, self.pace_seconds.unwrap_or(0))?;
            if let Some(stride) = self.stride_length_feet {
                if !stride.is_finite() || stride <= 0.0 {
                    return Err(AppError::out_of_range(
                        "strideLengthFeet",
                        "strideLengthFeet must be a positive number of feet",
                    ));
                }
            }
            return Ok(CadenceRequest::Pace {
                pace,
                stride_length_feet: self.stride_length_feet,
            });
        }

        match self.target_cadence {
            Some(cadence) if cadence.is_finite() && cadence >= 1.0 => {
                Ok(CadenceRequest::Direct { cadence })
            }
            _ => Err(missing_target_error()),
        }
    }

    /// Tolerance from the body, or `default` when absent
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` for a negative tolerance
    pub fn tolerance_or(&self, default: f64) -> AppResult<f64> {
        match self.tolerance {
            None => Ok(default),
            Some(tolerance) if tolerance.is_finite() && tolerance >= 0.0 => Ok(tolerance),
            Some(_) => Err(AppError::out_of_range(
                "tolerance",
                "tolerance must be zero or greater",
            )),
        }
    }

    /// Check the body without resolving it
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::cadence_request`] and [`Self::tolerance_or`]
    pub fn validate(&self, default_tolerance: f64) -> AppResult<()> {
        self.cadence_request()?;
        self.tolerance_or(default_tolerance)?;
        Ok(())
    }

    /// Playlist id, ignoring blank values
    #[must_use]
    pub fn playlist_id(&self) -> Option<&str> {
        self.playlist_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// 400 raised when a request carries neither a pace nor a cadence
#[must_use]
pub fn missing_target_error() -> AppError {
    AppError::missing_field("Either pace (paceMinutes, paceSeconds) or targetCadence is required")
        .with_details(json!({
            "examples": {
                "paceExample": {
                    "paceMinutes": 10,
                    "paceSeconds": 30,
                    "strideLengthFeet": 3.5
                },
                "bpmExample": { "targetCadence": 165 }
            },
            "note": "Pace like 10:30 per mile gets converted to ~165 BPM based on estimated stride length"
        }))
}

/// Run a filter request against the catalog
///
/// The request is validated before any catalog call. The primary pool is the
/// playlist named by `playlistId`, or the saved library. Recommendations are
/// requested only when no primary track falls in the window.
///
/// # Errors
///
/// Returns validation errors (400) from the request, and catalog failures
/// mapped through `From<ProviderError>` (401, 429, 502, 503)
#[instrument(skip_all, fields(catalog = catalog.name()))]
pub async fn filter_tracks(
    catalog: &dyn MusicCatalog,
    estimator: &CadenceEstimator,
    config: &ServerConfig,
    token: &AccessToken,
    request: &FilterRequest,
) -> AppResult<FilterReport> {
    let cadence_request = request.cadence_request()?;
    let tolerance = request.tolerance_or(config.tempo.default_tolerance)?;
    let target = cadence_request.resolve(estimator);

    let primary = match request.playlist_id() {
        Some(playlist_id) => catalog.playlist_tracks(token, playlist_id).await?,
        None => catalog.saved_tracks(token).await?,
    };

    let seeds = RecommendationSeeds::from_pool(&primary, &config.recommendations.seed_genres);
    let limit = config.recommendations.limit;
    let cadence = target.cadence;

    let result = match_tracks_with(&target, tolerance, primary, |window| async move {
        let query = RecommendationQuery::new(seeds, cadence, window.min(), window.max())
            .with_limit(limit);
        catalog.recommendations(token, &query).await
    })
    .await?;

    let report = FilterReport::from(result);
    info!(
        target_cadence = report.target_cadence,
        bpm_range = %report.bpm_range,
        total_tracks = report.total_tracks,
        filtered_count = report.filtered_count,
        recommendations_added = report.recommendations_added,
        "Filter request served"
    );
    Ok(report)
}
