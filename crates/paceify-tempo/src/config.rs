// ABOUTME: Stride band table and tempo matching configuration with env overrides
// ABOUTME: Validates band ordering and stride lengths before the estimator uses them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt;

use paceify_core::constants::cadence::{
    BASE_STRIDE_FEET, DEFAULT_STRIDE_BANDS, DEFAULT_TOLERANCE_BPM, FALLBACK_CADENCE_SPM,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

/// One stride band: at or above `min_mph`, assume `stride_feet`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrideBand {
    /// Lower speed bound of the band, inclusive
    pub min_mph: f64,
    /// Stride length assumed inside the band
    pub stride_feet: f64,
}

/// Ordered step function from running speed to stride length
///
/// Bands are checked fastest first and the first band whose `min_mph` is at or
/// below the speed wins. Speeds under every band get `base_stride_feet`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrideTable {
    bands: Vec<StrideBand>,
    base_stride_feet: f64,
}

impl Default for StrideTable {
    fn default() -> Self {
        Self {
            bands: DEFAULT_STRIDE_BANDS
                .iter()
                .map(|&(min_mph, stride_feet)| StrideBand {
                    min_mph,
                    stride_feet,
                })
                .collect(),
            base_stride_feet: BASE_STRIDE_FEET,
        }
    }
}

impl StrideTable {
    /// Build a validated table
    ///
    /// # Errors
    ///
    /// Returns an error if a stride is not positive or thresholds are not
    /// strictly descending.
    pub fn new(bands: Vec<StrideBand>, base_stride_feet: f64) -> Result<Self, ConfigError> {
        let table = Self {
            bands,
            base_stride_feet,
        };
        table.validate()?;
        Ok(table)
    }

    /// Parse bands written as `min_mph:stride_feet` pairs separated by commas
    ///
    /// # Errors
    ///
    /// Returns an error on malformed pairs or if the resulting table is invalid.
    pub fn parse(bands: &str, base_stride_feet: f64) -> Result<Self, ConfigError> {
        let parsed = bands
            .split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (mph, stride) = pair
                    .split_once(':')
                    .ok_or_else(|| ConfigError::Parse(format!("expected mph:stride, got '{pair}'")))?;
                let min_mph = mph
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::Parse(format!("invalid mph '{mph}': {e}")))?;
                let stride_feet = stride
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::Parse(format!("invalid stride '{stride}': {e}")))?;
                Ok(StrideBand {
                    min_mph,
                    stride_feet,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Self::new(parsed, base_stride_feet)
    }

    /// Load the table from `TEMPO_STRIDE_BANDS` and `TEMPO_BASE_STRIDE_FEET`
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match env::var("TEMPO_BASE_STRIDE_FEET") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| ConfigError::Parse(format!("TEMPO_BASE_STRIDE_FEET: {e}")))?,
            Err(_) => BASE_STRIDE_FEET,
        };
        match env::var("TEMPO_STRIDE_BANDS") {
            Ok(raw) => Self::parse(&raw, base),
            Err(_) => Self::new(Self::default().bands, base),
        }
    }

    /// Check stride lengths and band ordering
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_stride_feet.is_finite() && self.base_stride_feet > 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "base stride length must be positive",
            ));
        }
        if self
            .bands
            .iter()
            .any(|band| !(band.stride_feet.is_finite() && band.stride_feet > 0.0))
        {
            return Err(ConfigError::ValueOutOfRange(
                "band stride lengths must be positive",
            ));
        }
        if self
            .bands
            .windows(2)
            .any(|pair| pair[0].min_mph <= pair[1].min_mph)
        {
            return Err(ConfigError::InvalidRange(
                "band speed thresholds must be strictly descending",
            ));
        }
        Ok(())
    }

    /// Stride length for a running speed
    #[must_use]
    pub fn stride_for(&self, mph: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| mph >= band.min_mph)
            .map_or(self.base_stride_feet, |band| band.stride_feet)
    }

    /// Configured bands, fastest first
    #[must_use]
    pub fn bands(&self) -> &[StrideBand] {
        &self.bands
    }

    /// Stride used below the slowest band
    #[must_use]
    pub const fn base_stride_feet(&self) -> f64 {
        self.base_stride_feet
    }
}

impl fmt::Display for StrideTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for band in &self.bands {
            write!(f, ">={}mph:{}ft ", band.min_mph, band.stride_feet)?;
        }
        write!(f, "else {}ft", self.base_stride_feet)
    }
}

/// Tempo matching configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempoConfig {
    /// Tolerance used when a request omits one
    pub default_tolerance: f64,
    /// Cadence substituted when a pace cannot yield one
    pub fallback_cadence: f64,
    /// Speed to stride table
    pub strides: StrideTable,
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self {
            default_tolerance: DEFAULT_TOLERANCE_BPM,
            fallback_cadence: FALLBACK_CADENCE_SPM,
            strides: StrideTable::default(),
        }
    }
}

impl TempoConfig {
    /// Load tempo configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if the stride table is malformed, a value does not
    /// parse, the default tolerance is negative or the fallback cadence is not
    /// positive.
    pub fn from_env() -> Result<Self, ConfigError> {
        let default_tolerance = env_f64("TEMPO_DEFAULT_TOLERANCE", DEFAULT_TOLERANCE_BPM)?;
        Self::check_tolerance(default_tolerance)?;
        let fallback_cadence = env_f64("TEMPO_FALLBACK_CADENCE", FALLBACK_CADENCE_SPM)?;
        Self::check_fallback_cadence(fallback_cadence)?;
        Ok(Self {
            default_tolerance,
            fallback_cadence,
            strides: StrideTable::from_env()?,
        })
    }

    fn check_tolerance(tolerance: f64) -> Result<(), ConfigError> {
        if tolerance.is_finite() && tolerance >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::ValueOutOfRange(
                "default tolerance must be finite and non-negative",
            ))
        }
    }

    fn check_fallback_cadence(cadence: f64) -> Result<(), ConfigError> {
        if cadence.is_finite() && cadence > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::ValueOutOfRange(
                "fallback cadence must be finite and positive",
            ))
        }
    }
}

/// Read a float variable, using `default` when unset
fn env_f64(name: &str, default: f64) -> Result<f64, ConfigError> {
    env::var(name).map_or(Ok(default), |raw| parse_f64(name, &raw))
}

fn parse_f64(name: &str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::Parse(format!("{name}: invalid number '{raw}': {e}")))
}
