// ABOUTME: Cadence estimation constants for pace conversion and tempo matching
// ABOUTME: Stride bands, tolerance defaults and unit conversions used by the tempo engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Feet in one statute mile
pub const FEET_PER_MILE: f64 = 5280.0;

/// Seconds in one minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Seconds in one hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Default half-width of the tempo window in BPM
pub const DEFAULT_TOLERANCE_BPM: f64 = 10.0;

/// Cadence of the 10:30/mile reference pace, used when no pace can be derived
pub const FALLBACK_CADENCE_SPM: f64 = 168.0;

/// Smallest pace minute value that yields a cadence
pub const MIN_PACE_MINUTES: u32 = 1;

/// Largest valid seconds component of a pace
pub const MAX_PACE_SECONDS: u32 = 59;

/// Stride length bands as `(minimum mph, stride feet)`, fastest first
pub const DEFAULT_STRIDE_BANDS: [(f64, f64); 3] = [(8.0, 3.5), (6.5, 3.2), (5.0, 3.0)];

/// Stride length used below the slowest band
pub const BASE_STRIDE_FEET: f64 = 2.8;

/// Paces (minutes, seconds) listed in the conversion table
pub const PACE_TABLE_ENTRIES: [(u32, u32); 8] = [
    (6, 0),
    (7, 0),
    (8, 0),
    (9, 0),
    (10, 0),
    (10, 30),
    (11, 0),
    (12, 0),
];
