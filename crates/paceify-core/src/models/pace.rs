// ABOUTME: Running pace model expressed as minutes and seconds per mile
// ABOUTME: Validates the seconds component and renders the M:SS display form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::cadence::{MAX_PACE_SECONDS, MIN_PACE_MINUTES};
use crate::errors::{AppError, AppResult};

/// Time taken to cover one mile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pace {
    minutes: u32,
    seconds: u32,
}

impl Pace {
    /// Create a pace
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` if `seconds` exceeds 59.
    pub fn new(minutes: u32, seconds: u32) -> AppResult<Self> {
        if seconds > MAX_PACE_SECONDS {
            return Err(AppError::out_of_range(
                "paceSeconds",
                format!("paceSeconds must be between 0 and {MAX_PACE_SECONDS}, got {seconds}"),
            ));
        }
        Ok(Self { minutes, seconds })
    }

    /// Whole minutes component
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.minutes
    }

    /// Seconds component, 0 to 59
    #[must_use]
    pub const fn seconds(self) -> u32 {
        self.seconds
    }

    /// Total seconds per mile
    #[must_use]
    pub fn total_seconds(self) -> u64 {
        u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    /// Whether a cadence can be derived from this pace
    #[must_use]
    pub const fn is_runnable(self) -> bool {
        self.minutes >= MIN_PACE_MINUTES
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

impl FromStr for Pace {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (minutes, seconds) = s.trim().split_once(':').unwrap_or((s.trim(), "0"));
        let minutes = minutes
            .parse()
            .map_err(|_| AppError::invalid_input(format!("Invalid pace minutes in '{s}'")))?;
        let seconds = seconds
            .parse()
            .map_err(|_| AppError::invalid_input(format!("Invalid pace seconds in '{s}'")))?;
        Self::new(minutes, seconds)
    }
}
