//! Data-driven movement balance
//!
//! All magnitude tables and kinematic constants live here as plain serde
//! structs, so balance can be tweaked without touching the engine. On wasm a
//! LocalStorage override is honored; native builds use the defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{CollisionEnvelope, MoveDirection};

/// Per-direction magnitude lookup
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DirectionTable {
    pub left: f32,
    pub left_top: f32,
    pub left_bottom: f32,
    pub down: f32,
    pub right_bottom: f32,
    pub right_top: f32,
    pub right: f32,
    pub up: f32,
}

impl DirectionTable {
    pub fn get(&self, direction: MoveDirection) -> f32 {
        match direction {
            MoveDirection::Left => self.left,
            MoveDirection::LeftTop => self.left_top,
            MoveDirection::LeftBottom => self.left_bottom,
            MoveDirection::Down => self.down,
            MoveDirection::RightBottom => self.right_bottom,
            MoveDirection::RightTop => self.right_top,
            MoveDirection::Right => self.right,
            MoveDirection::Up => self.up,
            MoveDirection::None => 0.0,
        }
    }
}

/// Kinematic constants and force tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsTuning {
    /// Speed cap; faster candidate velocities are scaled down uniformly
    pub max_speed: f32,
    /// Speeds below this collapse to rest (whole-vector threshold)
    pub min_speed: f32,
    /// Fraction of perpendicular velocity kept (sign-flipped) on impact
    pub conservation: f32,
    /// Slope-scaled gravity pull, active under slide operations
    pub gravity: DirectionTable,
    /// Direct thrust, active under slide/move operations
    pub thrust: DirectionTable,
    /// Drag opposing lateral thrust
    pub friction: DirectionTable,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            max_speed: 500.0,
            // Must stay below net lateral thrust (thrust - friction), or the
            // character could never leave rest sideways
            min_speed: 5.0,
            conservation: 0.5,
            gravity: DirectionTable {
                // Diagonal slopes pull at 0.6x / 0.8x of the full drop
                left_top: 0.6 * 15.0,
                left_bottom: 0.8 * 15.0,
                down: 15.0,
                right_bottom: 0.8 * 15.0,
                right_top: 0.6 * 15.0,
                ..Default::default()
            },
            thrust: DirectionTable { left: 10.0, right: 10.0, up: 7.0, ..Default::default() },
            friction: DirectionTable { left: 5.0, right: 5.0, ..Default::default() },
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    /// Character collision envelope offsets from its center point
    pub envelope: CollisionEnvelope,
    /// Character start position (canvas coords)
    pub start_position: Vec2,
    /// Animation clock scale (px/sec equivalent)
    pub animation_speed: f32,
    /// Track to play
    pub track: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            physics: PhysicsTuning::default(),
            envelope: CollisionEnvelope { top: 17.0, bottom: 31.0, left: 15.0, right: 15.0 },
            start_position: Vec2::ZERO,
            animation_speed: 200.0,
            track: 1,
        }
    }
}

impl Tuning {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "beeline_tuning";

    /// Load tuning, honoring a LocalStorage override (wasm only).
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(tuning) = serde_json::from_str(&json) {
                    log::info!("Loaded tuning override from LocalStorage");
                    return tuning;
                }
                log::warn!("Ignoring malformed tuning override");
            }
        }

        Self::default()
    }

    /// Persist the current tuning as the LocalStorage override (wasm only).
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_direction_has_zero_magnitude() {
        let tuning = PhysicsTuning::default();
        assert_eq!(tuning.gravity.get(MoveDirection::None), 0.0);
        assert_eq!(tuning.thrust.get(MoveDirection::None), 0.0);
        assert_eq!(tuning.friction.get(MoveDirection::None), 0.0);
    }

    #[test]
    fn test_slope_scaling() {
        let gravity = PhysicsTuning::default().gravity;
        assert!(gravity.get(MoveDirection::Down) > gravity.get(MoveDirection::LeftBottom));
        assert!(gravity.get(MoveDirection::LeftBottom) > gravity.get(MoveDirection::LeftTop));
        assert_eq!(gravity.get(MoveDirection::Left), 0.0);
    }

    #[test]
    fn test_tuning_json_round_trip() {
        let tuning = Tuning::default();
        let json = serde_json::to_string(&tuning).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back.physics.max_speed, tuning.physics.max_speed);
        assert_eq!(back.envelope.bottom, tuning.envelope.bottom);
    }
}
