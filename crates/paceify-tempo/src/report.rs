// ABOUTME: Wire representation of tempo match results for the filter endpoint
// ABOUTME: Formats tracks with rounded BPM and joined artists, plus match provenance counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize, Serializer};

use crate::matcher::{MatchResult, MatchedTrack};

/// Track as listed in a filter response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    /// Catalog track id
    pub id: String,
    /// Track title
    pub name: String,
    /// Artist names joined with ", "
    pub artists: String,
    /// Album title
    pub album: String,
    /// Duration in milliseconds
    #[serde(rename = "duration_ms")]
    pub duration_ms: u64,
    /// Tempo rounded to one decimal
    #[serde(serialize_with = "whole_as_integer")]
    pub bpm: f64,
    /// Energy, when analysed
    pub energy: Option<f64>,
    /// Danceability, when analysed
    pub danceability: Option<f64>,
    /// Catalog URI for playlist creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Whether the track came from recommendations
    pub is_recommended: bool,
}

impl From<MatchedTrack> for TrackSummary {
    fn from(matched: MatchedTrack) -> Self {
        let is_recommended = matched.is_recommended();
        let artists = matched.track.artist_line();
        let track = matched.track;
        Self {
            id: track.id,
            name: track.name,
            artists,
            album: track.album,
            duration_ms: track.duration_ms,
            bpm: (matched.tempo * 10.0).round() / 10.0,
            energy: track.energy,
            danceability: track.danceability,
            uri: track.uri,
            is_recommended,
        }
    }
}

/// Response body of `POST /filter`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterReport {
    /// Resolved target cadence
    #[serde(serialize_with = "whole_as_integer")]
    pub target_cadence: f64,
    /// Pace in `M:SS` form, for pace-derived targets
    pub original_pace: Option<String>,
    /// Half-width of the window
    #[serde(serialize_with = "whole_as_integer")]
    pub tolerance: f64,
    /// Window as `min-max`
    pub bpm_range: String,
    /// Primary pool size before tempo exclusion
    pub total_tracks: usize,
    /// Primary pool tracks inside the window
    pub filtered_count: usize,
    /// Fallback tracks used
    pub recommendations_added: usize,
    /// Final ordered tracks
    pub tracks: Vec<TrackSummary>,
}

impl From<MatchResult> for FilterReport {
    fn from(result: MatchResult) -> Self {
        Self {
            target_cadence: result.target_cadence,
            original_pace: result.original_pace.map(|pace| pace.to_string()),
            tolerance: result.tolerance,
            bpm_range: result.window.to_string(),
            total_tracks: result.total_candidates,
            filtered_count: result.primary_matches,
            recommendations_added: result.fallback_added,
            tracks: result.tracks.into_iter().map(TrackSummary::from).collect(),
        }
    }
}

/// Emit whole numbers as JSON integers so `168.0` goes out as `168`
fn whole_as_integer<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // Beyond 2^53 an f64 no longer represents every integer
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_tracks;
    use crate::request::{CadenceRequest, ResolvedCadence};
    use crate::CadenceEstimator;
    use paceify_core::models::{AudioFeatures, Pace, Track};
    use serde_json::json;

    fn library() -> Vec<Track> {
        vec![
            Track::new("track1", "Running Up That Hill", vec!["Kate Bush".to_owned()], "Hounds of Love", 298_000)
                .with_features(AudioFeatures { tempo: 125.94, energy: Some(0.7), danceability: Some(0.6) }),
            Track::new(
                "track4",
                "Uptown Funk",
                vec!["Mark Ronson".to_owned(), "Bruno Mars".to_owned()],
                "Uptown Special",
                269_000,
            )
            .with_features(AudioFeatures { tempo: 115.0, energy: Some(0.9), danceability: Some(0.9) })
            .with_uri("spotify:track:track4"),
        ]
    }

    #[test]
    fn test_direct_report_shape() {
        let result = match_tracks(&ResolvedCadence::direct(120.0), 10.0, library(), vec![]);
        let value = serde_json::to_value(FilterReport::from(result)).unwrap();

        assert_eq!(value["targetCadence"], json!(120));
        assert_eq!(value["originalPace"], json!(null));
        assert_eq!(value["tolerance"], json!(10));
        assert_eq!(value["bpmRange"], "110-130");
        assert_eq!(value["totalTracks"], 2);
        assert_eq!(value["filteredCount"], 2);
        assert_eq!(value["recommendationsAdded"], 0);

        let first = &value["tracks"][0];
        assert_eq!(first["bpm"], json!(125.9));
        assert_eq!(first["duration_ms"], 298_000);
        assert_eq!(first["isRecommended"], false);
        assert!(first.get("uri").is_none());

        let second = &value["tracks"][1];
        assert_eq!(second["artists"], "Mark Ronson, Bruno Mars");
        assert_eq!(second["bpm"], json!(115));
        assert_eq!(second["uri"], "spotify:track:track4");
    }

    #[test]
    fn test_pace_report_carries_original_pace() {
        let request = CadenceRequest::Pace {
            pace: Pace::new(10, 5).unwrap(),
            stride_length_feet: None,
        };
        let resolved = request.resolve(&CadenceEstimator::default());
        let report = FilterReport::from(match_tracks(&resolved, 10.0, vec![], vec![]));
        assert_eq!(report.original_pace.as_deref(), Some("10:05"));
        assert!(report.tracks.is_empty());
    }
}
