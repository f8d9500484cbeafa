// ABOUTME: Track model with optional audio features from the catalog
// ABOUTME: Tempo is optional because not every catalog track has analysis data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Audio analysis attached to a track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    /// Estimated tempo in BPM
    pub tempo: f64,
    /// Perceptual intensity, 0.0 to 1.0
    pub energy: Option<f64>,
    /// Suitability for dancing, 0.0 to 1.0
    pub danceability: Option<f64>,
}

/// A playable catalog track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog track id
    pub id: String,
    /// Track title
    pub name: String,
    /// Artist names in credit order
    pub artists: Vec<String>,
    /// Album title
    pub album: String,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Tempo in BPM; tracks without one never match a tempo window
    pub tempo: Option<f64>,
    /// Energy from audio analysis
    pub energy: Option<f64>,
    /// Danceability from audio analysis
    pub danceability: Option<f64>,
    /// Catalog URI used when adding the track to a playlist
    pub uri: Option<String>,
}

impl Track {
    /// Create a track without audio features
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        artists: Vec<String>,
        album: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artists,
            album: album.into(),
            duration_ms,
            tempo: None,
            energy: None,
            danceability: None,
            uri: None,
        }
    }

    /// Attach audio features
    #[must_use]
    pub const fn with_features(mut self, features: AudioFeatures) -> Self {
        self.tempo = Some(features.tempo);
        self.energy = features.energy;
        self.danceability = features.danceability;
        self
    }

    /// Attach a catalog URI
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Artist names joined for display
    #[must_use]
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_line_joins_with_comma() {
        let track = Track::new(
            "track4",
            "Uptown Funk",
            vec!["Mark Ronson".to_owned(), "Bruno Mars".to_owned()],
            "Uptown Special",
            269_000,
        );
        assert_eq!(track.artist_line(), "Mark Ronson, Bruno Mars");
        assert!(track.tempo.is_none());
    }

    #[test]
    fn test_with_features_sets_tempo() {
        let track = Track::new("t", "n", vec![], "a", 1).with_features(AudioFeatures {
            tempo: 125.9,
            energy: Some(0.7),
            danceability: None,
        });
        assert_eq!(track.tempo, Some(125.9));
        assert_eq!(track.energy, Some(0.7));
        assert_eq!(track.danceability, None);
    }
}
