//! Track/world model
//!
//! Static description of a level: its border and obstacle rectangles.
//! Immutable after load; every shape is validated at construction so the
//! per-tick collision queries never have to handle malformed geometry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::geometry::Rect;

/// Track loading/validation failures
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("track {0}: border is inverted or non-finite")]
    InvalidBorder(u32),
    #[error("track {track}: obstacle {index} has negative or non-finite extents")]
    InvalidObstacle { track: u32, index: usize },
    #[error("no track with id {0}")]
    UnknownTrack(u32),
    #[error("track config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Track boundary, expressed as the four wall coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

/// One level: a border and its obstacle rectangles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub border: Border,
    pub obstacles: Vec<Rect>,
}

impl Track {
    fn validate(&self, id: u32) -> Result<(), TrackError> {
        let b = &self.border;
        let finite = b.top.is_finite() && b.bottom.is_finite() && b.left.is_finite() && b.right.is_finite();
        if !finite || b.top >= b.bottom || b.left >= b.right {
            return Err(TrackError::InvalidBorder(id));
        }
        for (index, o) in self.obstacles.iter().enumerate() {
            let finite = o.x.is_finite() && o.y.is_finite() && o.w.is_finite() && o.h.is_finite();
            if !finite || o.w < 0.0 || o.h < 0.0 {
                return Err(TrackError::InvalidObstacle { track: id, index });
            }
        }
        Ok(())
    }
}

/// Read-only lookup of tracks by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSet {
    tracks: BTreeMap<u32, Track>,
}

impl TrackSet {
    /// Build a set from already-constructed tracks, validating each.
    pub fn new(tracks: BTreeMap<u32, Track>) -> Result<Self, TrackError> {
        for (id, track) in &tracks {
            track.validate(*id)?;
        }
        Ok(Self { tracks })
    }

    /// Parse and validate a JSON track config.
    pub fn from_json(json: &str) -> Result<Self, TrackError> {
        let tracks: BTreeMap<u32, Track> = serde_json::from_str(json)?;
        let set = Self::new(tracks)?;
        log::info!("Loaded {} track(s)", set.tracks.len());
        Ok(set)
    }

    pub fn get(&self, id: u32) -> Option<&Track> {
        self.tracks.get(&id)
    }

    /// Lookup that fails fast for missing ids (load-time use).
    pub fn require(&self, id: u32) -> Result<&Track, TrackError> {
        self.get(id).ok_or(TrackError::UnknownTrack(id))
    }
}

impl Default for TrackSet {
    /// The built-in level: a wide meadow with five thin leaf platforms.
    fn default() -> Self {
        let track = Track {
            border: Border { top: -330.0, bottom: 70.0, left: -370.0, right: 430.0 },
            obstacles: vec![
                Rect::from_edges(-100.0, -100.0, 0.0, -90.0),
                Rect::from_edges(200.0, -150.0, 300.0, -140.0),
                Rect::from_edges(0.0, -130.0, 100.0, -120.0),
                Rect::from_edges(-300.0, -200.0, -200.0, -190.0),
                Rect::from_edges(-180.0, -200.0, -80.0, -190.0),
            ],
        };
        let mut tracks = BTreeMap::new();
        tracks.insert(1, track);
        // Built-in data is well-formed by construction
        Self { tracks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_track_present_and_valid() {
        let set = TrackSet::default();
        let track = set.require(1).unwrap();
        assert_eq!(track.obstacles.len(), 5);
        track.validate(1).unwrap();
    }

    #[test]
    fn test_unknown_track() {
        let set = TrackSet::default();
        assert!(matches!(set.require(7), Err(TrackError::UnknownTrack(7))));
    }

    #[test]
    fn test_inverted_border_rejected() {
        let mut tracks = BTreeMap::new();
        tracks.insert(
            2,
            Track {
                border: Border { top: 100.0, bottom: -100.0, left: 0.0, right: 10.0 },
                obstacles: vec![],
            },
        );
        assert!(matches!(TrackSet::new(tracks), Err(TrackError::InvalidBorder(2))));
    }

    #[test]
    fn test_negative_obstacle_rejected() {
        let mut tracks = BTreeMap::new();
        tracks.insert(
            3,
            Track {
                border: Border { top: -10.0, bottom: 10.0, left: -10.0, right: 10.0 },
                obstacles: vec![Rect::new(0.0, 0.0, -5.0, 2.0)],
            },
        );
        assert!(matches!(
            TrackSet::new(tracks),
            Err(TrackError::InvalidObstacle { track: 3, index: 0 })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{
            "1": {
                "border": { "top": -50.0, "bottom": 50.0, "left": -50.0, "right": 50.0 },
                "obstacles": [ { "x": 0.0, "y": 0.0, "w": 10.0, "h": 2.0 } ]
            }
        }"#;
        let set = TrackSet::from_json(json).unwrap();
        assert_eq!(set.get(1).unwrap().obstacles.len(), 1);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(TrackSet::from_json("not json"), Err(TrackError::Parse(_))));
    }

    #[test]
    fn test_zero_extent_obstacle_is_valid() {
        // Degenerate rectangles are zero-measure geometry, not errors
        let mut tracks = BTreeMap::new();
        tracks.insert(
            4,
            Track {
                border: Border { top: -10.0, bottom: 10.0, left: -10.0, right: 10.0 },
                obstacles: vec![Rect::new(0.0, 0.0, 0.0, 0.0)],
            },
        );
        assert!(TrackSet::new(tracks).is_ok());
    }
}
