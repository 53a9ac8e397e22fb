//! Deterministic simulation module
//!
//! All movement logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame, driven by the host scheduler
//! - Input reaches the tick only through the intent latch
//! - No rendering or platform dependencies

pub mod control;
pub mod geometry;
pub mod interaction;
pub mod physics;
pub mod tick;
pub mod track;

pub use control::{ControlState, IntentMode, Key, MoveDirection, MovementIntent, operation_for};
pub use geometry::{Interval, Rect, Side, Touch, Vector, sum_coords};
pub use interaction::{CollisionEnvelope, CollisionQuery, Interaction, WallQuery};
pub use physics::{KinematicState, Operation, PhysicsEngine};
pub use tick::{PositionSink, SpriteAnimator, SpriteId, TickOutcome, World};
pub use track::{Border, Track, TrackError, TrackSet};
