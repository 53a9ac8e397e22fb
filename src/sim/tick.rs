//! Per-frame step
//!
//! Glues the intent latch, physics engine, and collision resolver together:
//! once per animation frame the scheduler calls [`World::tick`], which
//! resolves the current intent into an operation, advances kinematics, and
//! emits the accepted position to the render boundary. The wing-flap sprite
//! swap runs as its own cooperative task; the only state it owns is the
//! frame index.

use glam::Vec2;

use super::control::{ControlState, operation_for};
use super::interaction::Interaction;
use super::physics::{Operation, PhysicsEngine};
use super::track::{TrackError, TrackSet};
use crate::tuning::Tuning;

/// Sprites known to the render boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Character,
    Tree,
    Column,
    Stone,
}

/// Render boundary consumed by the core; the core never draws.
pub trait PositionSink {
    /// A sprite's accepted position changed this frame.
    fn on_position_updated(&mut self, sprite: SpriteId, position: Vec2);

    /// The periodic sprite-swap task advanced to `frame_index`.
    fn on_sprite_tick(&mut self, frame_index: usize);
}

/// Wing-flap animator, driven by its own repeating timer
#[derive(Debug, Clone, Copy)]
pub struct SpriteAnimator {
    frames: usize,
    current: usize,
}

impl SpriteAnimator {
    pub fn new(frames: usize) -> Self {
        Self { frames: frames.max(1), current: 0 }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Advance to the next frame and notify the sink.
    pub fn advance(&mut self, sink: &mut impl PositionSink) {
        self.current = (self.current + 1) % self.frames;
        sink.on_sprite_tick(self.current);
    }

    /// Snap back to the resting frame (timer cleared).
    pub fn reset(&mut self, sink: &mut impl PositionSink) {
        self.current = 0;
        sink.on_sprite_tick(0);
    }
}

/// What one frame did, for the scheduler's stop decisions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub operation: Operation,
    pub position: Vec2,
    /// Whether the candidate position was committed and emitted
    pub moved: bool,
    /// Standing with all kinematics at rest; a demo route may stop here
    pub settled: bool,
}

/// Owned state of one play session: the intent latch, the engine, and the
/// resolver for the active track
#[derive(Debug, Clone)]
pub struct World {
    pub control: ControlState,
    pub engine: PhysicsEngine,
    pub interaction: Interaction,
}

impl World {
    /// Assemble a session from config; fails fast on an unknown track id.
    pub fn new(tuning: &Tuning, tracks: &TrackSet) -> Result<Self, TrackError> {
        let track = tracks.require(tuning.track)?.clone();
        log::info!(
            "World on track {} with {} obstacle(s), start ({:.0}, {:.0})",
            tuning.track,
            track.obstacles.len(),
            tuning.start_position.x,
            tuning.start_position.y,
        );
        Ok(Self {
            control: ControlState::default(),
            engine: PhysicsEngine::new(tuning.physics.clone(), tuning.start_position),
            interaction: Interaction::new(tuning.envelope, track),
        })
    }

    /// Advance one animation frame.
    ///
    /// Reads whatever intent is latched at this instant, ticks the engine
    /// once, and emits the position to the sink only when it actually
    /// changed.
    pub fn tick(&mut self, sink: &mut impl PositionSink) -> TickOutcome {
        let operation = operation_for(self.control.intent());
        let before = self.engine.state.position;
        let position = self.engine.tick(operation, &self.interaction);
        let moved = position != before;
        if moved {
            sink.on_position_updated(SpriteId::Character, position);
        }
        let settled = operation == Operation::Stand && self.engine.state.velocity == Vec2::ZERO;
        TickOutcome { operation, position, moved, settled }
    }
}
