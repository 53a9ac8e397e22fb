//! Beeline - a canvas bee-flight arcade prototype
//!
//! Core modules:
//! - `sim`: Deterministic physics and collision core (no rendering or
//!   platform dependencies)
//! - `tuning`: Data-driven movement balance and track configuration
//!
//! Rendering, asset loading, and canvas management live outside the crate;
//! the simulation hands accepted positions to a [`sim::PositionSink`].

pub mod sim;
pub mod tuning;

pub use sim::{CollisionQuery, PositionSink, SpriteId};
pub use tuning::Tuning;

/// Shared gameplay constants
pub mod consts {
    /// A candidate move past any bound by more than this is rejected outright
    pub const OUTSIDE_TOLERANCE: f32 = 1.0;
    /// Edge proximity that counts as sliding contact
    pub const TOUCH_TOLERANCE: f32 = 1.0;
    /// Wing-flap sprite swap period (ms)
    pub const SPRITE_SWAP_INTERVAL_MS: u32 = 70;
    /// Number of wing-flap frames cycled by the sprite animator
    pub const SPRITE_FRAMES: usize = 2;
}
