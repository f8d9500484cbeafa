// ABOUTME: Cadence request sum type resolved once at the API boundary
// ABOUTME: Either a pace with optional stride override or a direct cadence target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use paceify_core::models::Pace;
use tracing::info;

use crate::estimator::{CadenceEstimate, CadenceEstimator};

/// How the caller expressed the target cadence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CadenceRequest {
    /// Derive the cadence from a pace
    Pace {
        /// Time per mile
        pace: Pace,
        /// Stride length overriding the table, in feet
        stride_length_feet: Option<f64>,
    },
    /// Use the given cadence as is
    Direct {
        /// Steps per minute
        cadence: f64,
    },
}

/// A cadence target together with where it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCadence {
    /// Target steps per minute
    pub cadence: f64,
    /// Original pace, for pace-derived targets
    pub pace: Option<Pace>,
    /// Estimation details, for pace-derived targets
    pub estimate: Option<CadenceEstimate>,
}

impl ResolvedCadence {
    /// A target given directly as a cadence
    #[must_use]
    pub const fn direct(cadence: f64) -> Self {
        Self {
            cadence,
            pace: None,
            estimate: None,
        }
    }
}

impl CadenceRequest {
    /// Resolve to a single numeric target
    ///
    /// Paces under one minute per mile resolve to the reference cadence.
    #[must_use]
    pub fn resolve(&self, estimator: &CadenceEstimator) -> ResolvedCadence {
        match *self {
            Self::Pace {
                pace,
                stride_length_feet,
            } => {
                let estimate = pace
                    .is_runnable()
                    .then(|| estimator.estimate(pace, stride_length_feet));
                let cadence = estimate.map_or_else(
                    || estimator.cadence_or_default(pace, stride_length_feet),
                    |estimate| estimate.cadence,
                );
                info!(pace = %pace, cadence, "Resolved cadence from pace");
                ResolvedCadence {
                    cadence,
                    pace: Some(pace),
                    estimate,
                }
            }
            Self::Direct { cadence } => {
                info!(cadence, "Using direct cadence input");
                ResolvedCadence::direct(cadence)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pace_request_resolves_through_estimator() {
        let request = CadenceRequest::Pace {
            pace: Pace::new(10, 30).unwrap(),
            stride_length_feet: None,
        };
        let resolved = request.resolve(&CadenceEstimator::default());
        assert!((resolved.cadence - 168.0).abs() < f64::EPSILON);
        assert_eq!(resolved.pace.map(|p| p.to_string()).as_deref(), Some("10:30"));
        assert!(resolved.estimate.is_some());
    }

    #[test]
    fn test_direct_request_skips_estimator() {
        let resolved = CadenceRequest::Direct { cadence: 165.5 }.resolve(&CadenceEstimator::default());
        assert!((resolved.cadence - 165.5).abs() < f64::EPSILON);
        assert!(resolved.pace.is_none());
        assert!(resolved.estimate.is_none());
    }

    #[test]
    fn test_sub_minute_pace_uses_reference_cadence() {
        let request = CadenceRequest::Pace {
            pace: Pace::new(0, 30).unwrap(),
            stride_length_feet: None,
        };
        let resolved = request.resolve(&CadenceEstimator::default());
        assert!((resolved.cadence - 168.0).abs() < f64::EPSILON);
        assert!(resolved.estimate.is_none());

        let tuned = CadenceEstimator::default().with_fallback_cadence(175.0);
        assert!((request.resolve(&tuned).cadence - 175.0).abs() < f64::EPSILON);
    }
}
