// ABOUTME: Reference table converting common running paces to estimated cadence
// ABOUTME: Served by the pace-table endpoint so clients can preview pace choices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use paceify_core::constants::cadence::PACE_TABLE_ENTRIES;
use serde::{Deserialize, Serialize};

use crate::estimator::CadenceEstimator;

/// One row of the conversion table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceConversion {
    /// Pace label, e.g. `10:30 per mile`
    pub pace: String,
    /// Estimated cadence
    #[serde(rename = "estimatedBPM")]
    pub estimated_bpm: u32,
    /// Speed with one decimal
    pub mph: String,
}

/// Pace to cadence conversion table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceTable {
    /// Title
    pub message: String,
    /// Caveat about stride assumptions
    pub note: String,
    /// Rows, slowest pace last
    pub conversions: Vec<PaceConversion>,
}

impl PaceTable {
    /// Build the table for the standard paces using `estimator`
    #[must_use]
    pub fn build(estimator: &CadenceEstimator) -> Self {
        let conversions = PACE_TABLE_ENTRIES
            .iter()
            .map(|&(minutes, seconds)| {
                let estimate = estimator.estimate_components(minutes, seconds, None);
                PaceConversion {
                    pace: format!("{minutes}:{seconds:02} per mile"),
                    estimated_bpm: estimate.cadence as u32,
                    mph: format!("{:.1}", estimate.speed_mph),
                }
            })
            .collect();

        Self {
            message: "Pace to BPM conversion table".to_owned(),
            note: "BPM estimates based on average stride length. Actual cadence varies by individual."
                .to_owned(),
            conversions,
        }
    }
}
