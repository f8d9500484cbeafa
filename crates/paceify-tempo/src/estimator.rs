// ABOUTME: Pace to cadence estimation using a speed-dependent stride length
// ABOUTME: Deterministic, validation-free conversion; callers guard inputs at the boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Cadence estimation
//!
//! ```text
//! total_seconds    = minutes * 60 + seconds
//! miles_per_minute = 60 / total_seconds
//! mph              = 3600 / total_seconds
//! stride           = override, or the stride table entry for mph
//! cadence          = round(miles_per_minute * 5280 / stride)
//! ```
//!
//! `mph` is computed directly rather than as `miles_per_minute * 60` so band
//! edges land exactly: 7:30/mile is 8.0 mph and 12:00/mile is 5.0 mph.

use paceify_core::constants::cadence::{
    FALLBACK_CADENCE_SPM, FEET_PER_MILE, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use paceify_core::models::Pace;
use serde::Serialize;
use tracing::debug;

use crate::config::StrideTable;

/// Outcome of one pace conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CadenceEstimate {
    /// Rounded steps per minute
    pub cadence: f64,
    /// Running speed in miles per hour
    pub speed_mph: f64,
    /// Stride length used, in feet
    pub stride_feet: f64,
}

/// Converts paces to cadence with a configurable stride table
#[derive(Debug, Clone)]
pub struct CadenceEstimator {
    strides: StrideTable,
    fallback_cadence: f64,
}

impl Default for CadenceEstimator {
    fn default() -> Self {
        Self::new(StrideTable::default())
    }
}

impl CadenceEstimator {
    /// Create an estimator over a stride table
    #[must_use]
    pub const fn new(strides: StrideTable) -> Self {
        Self {
            strides,
            fallback_cadence: FALLBACK_CADENCE_SPM,
        }
    }

    /// Override the cadence used for paces under one minute per mile
    #[must_use]
    pub const fn with_fallback_cadence(mut self, fallback_cadence: f64) -> Self {
        self.fallback_cadence = fallback_cadence;
        self
    }

    /// Cadence used when a pace cannot yield one
    #[must_use]
    pub const fn fallback_cadence(&self) -> f64 {
        self.fallback_cadence
    }

    /// Stride table in use
    #[must_use]
    pub const fn strides(&self) -> &StrideTable {
        &self.strides
    }

    /// Estimate cadence for raw pace components
    ///
    /// No validation is performed; a zero pace yields a non-finite cadence.
    #[must_use]
    pub fn estimate_components(
        &self,
        minutes: u32,
        seconds: u32,
        stride_override: Option<f64>,
    ) -> CadenceEstimate {
        let total_seconds = f64::from(minutes) * SECONDS_PER_MINUTE + f64::from(seconds);
        let miles_per_minute = SECONDS_PER_MINUTE / total_seconds;
        let speed_mph = SECONDS_PER_HOUR / total_seconds;
        let stride_feet = stride_override.unwrap_or_else(|| self.strides.stride_for(speed_mph));
        let cadence = (miles_per_minute * FEET_PER_MILE / stride_feet).round();

        debug!(
            pace = %format_args!("{minutes}:{seconds:02}"),
            mph = %format_args!("{speed_mph:.1}"),
            cadence,
            stride_feet,
            "Pace calculation"
        );

        CadenceEstimate {
            cadence,
            speed_mph,
            stride_feet,
        }
    }

    /// Estimate cadence for a pace
    #[must_use]
    pub fn estimate(&self, pace: Pace, stride_override: Option<f64>) -> CadenceEstimate {
        self.estimate_components(pace.minutes(), pace.seconds(), stride_override)
    }

    /// Estimated cadence, or the fallback cadence (168 unless configured) when
    /// the pace is under one minute per mile
    #[must_use]
    pub fn cadence_or_default(&self, pace: Pace, stride_override: Option<f64>) -> f64 {
        if pace.is_runnable() {
            self.estimate(pace, stride_override).cadence
        } else {
            self.fallback_cadence
        }
    }
}

/// Estimate cadence with the default stride table
#[must_use]
pub fn estimate_cadence(minutes: u32, seconds: u32, stride_override: Option<f64>) -> f64 {
    CadenceEstimator::default()
        .estimate_components(minutes, seconds, stride_override)
        .cadence
}
