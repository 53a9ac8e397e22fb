//! Kinematics engine
//!
//! Maps the per-tick operation into acceleration, velocity, and position in
//! that order, then asks the collision resolver whether the candidate
//! position is legal. The engine owns the only mutable kinematic state in
//! the core and is advanced exactly once per animation frame.

use glam::Vec2;

use super::control::MoveDirection;
use super::geometry::{Side, Vector, sum_coords};
use super::interaction::{CollisionQuery, WallQuery};
use crate::consts::{OUTSIDE_TOLERANCE, TOUCH_TOLERANCE};
use crate::tuning::PhysicsTuning;

/// The resolved per-tick directive fed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SlideLeft,
    SlideLeftTop,
    SlideLeftBottom,
    SlideDown,
    SlideRightBottom,
    SlideRightTop,
    SlideRight,
    MoveLeft,
    MoveRight,
    MoveUp,
    Stand,
}

impl Operation {
    /// Direction of the gravity pull, active only while sliding a slope.
    fn gravity_direction(self) -> MoveDirection {
        match self {
            Operation::SlideLeftTop => MoveDirection::LeftTop,
            Operation::SlideLeftBottom => MoveDirection::LeftBottom,
            Operation::SlideDown => MoveDirection::Down,
            Operation::SlideRightBottom => MoveDirection::RightBottom,
            Operation::SlideRightTop => MoveDirection::RightTop,
            _ => MoveDirection::None,
        }
    }

    /// Direction of direct thrust.
    fn thrust_direction(self) -> MoveDirection {
        match self {
            Operation::SlideLeft | Operation::MoveLeft => MoveDirection::Left,
            Operation::SlideRight | Operation::MoveRight => MoveDirection::Right,
            Operation::MoveUp => MoveDirection::Up,
            _ => MoveDirection::None,
        }
    }

    /// Direction of friction, opposing lateral thrust.
    fn friction_direction(self) -> MoveDirection {
        match self {
            Operation::SlideLeft | Operation::MoveLeft => MoveDirection::Right,
            Operation::SlideRight | Operation::MoveRight => MoveDirection::Left,
            _ => MoveDirection::None,
        }
    }
}

/// Position and velocity of the character, in canvas pixel units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl KinematicState {
    pub fn at(position: Vec2) -> Self {
        Self { position, velocity: Vec2::ZERO }
    }

    pub fn reset(&mut self, position: Vec2) {
        *self = Self::at(position);
    }
}

/// Which bounds the character is currently resting against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlidingContact {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

/// The physics engine: tuning tables plus the mutable kinematic state
#[derive(Debug, Clone)]
pub struct PhysicsEngine {
    tuning: PhysicsTuning,
    pub state: KinematicState,
    sliding: SlidingContact,
}

impl PhysicsEngine {
    pub fn new(tuning: PhysicsTuning, start: Vec2) -> Self {
        Self { tuning, state: KinematicState::at(start), sliding: SlidingContact::default() }
    }

    pub fn sliding(&self) -> SlidingContact {
        self.sliding
    }

    pub fn reset(&mut self, start: Vec2) {
        self.state.reset(start);
        self.sliding = SlidingContact::default();
    }

    /// Resolve the operation into a net Cartesian acceleration.
    ///
    /// Three table-driven contributions (gravity, thrust, friction) are
    /// converted from polar form and summed, then any component pushing into
    /// a wall the character is resting against is dropped.
    pub fn acceleration_for(&self, operation: Operation) -> Vec2 {
        let t = &self.tuning;
        let gravity = operation.gravity_direction();
        let thrust = operation.thrust_direction();
        let friction = operation.friction_direction();

        let mut acc = sum_coords([
            Vector { length: t.gravity.get(gravity), angle: gravity.angle() }.to_coord(),
            Vector { length: t.thrust.get(thrust), angle: thrust.angle() }.to_coord(),
            Vector { length: t.friction.get(friction), angle: friction.angle() }.to_coord(),
        ]);

        if self.sliding.top && acc.y < 0.0 {
            acc.y = 0.0;
        }
        if self.sliding.bottom && acc.y > 0.0 {
            acc.y = 0.0;
        }
        if self.sliding.left && acc.x < 0.0 {
            acc.x = 0.0;
        }
        if self.sliding.right && acc.x > 0.0 {
            acc.x = 0.0;
        }
        acc
    }

    /// Candidate velocity after applying an acceleration.
    ///
    /// The magnitude is measured once, before clamping: above `max_speed`
    /// the vector scales down uniformly, below `min_speed` the whole vector
    /// collapses to rest (whole-magnitude threshold, not per-axis).
    pub fn integrate_velocity(&self, acc: Vec2) -> Vec2 {
        let mut velocity = self.state.velocity + acc;
        let speed = velocity.length();
        if speed > self.tuning.max_speed {
            velocity *= self.tuning.max_speed / speed;
        }
        if speed < self.tuning.min_speed {
            velocity = Vec2::ZERO;
        }
        velocity
    }

    /// Candidate position after applying a velocity.
    pub fn integrate_position(&self, velocity: Vec2) -> Vec2 {
        self.state.position + velocity
    }

    /// Advance one tick.
    ///
    /// Runs acceleration → velocity → position, reflects velocity off any
    /// collided side (scaled by the conservation factor), refreshes sliding
    /// contact, and commits the candidate position unless it is outside any
    /// bound by more than the outside tolerance; rejected moves leave the
    /// position untouched. Returns the position after the tick.
    pub fn tick(&mut self, operation: Operation, query: &impl CollisionQuery) -> Vec2 {
        let acc = self.acceleration_for(operation);
        self.state.velocity = self.integrate_velocity(acc);
        let candidate = self.integrate_position(self.state.velocity);

        let collisions = self.collision_sides(candidate, query);
        self.sliding = self.sliding_contact(candidate, query);

        let conservation = self.tuning.conservation;
        match collisions.as_slice() {
            [side] => match side {
                Side::Top | Side::Bottom => {
                    self.state.velocity.y = -(self.state.velocity.y * conservation);
                }
                Side::Left | Side::Right => {
                    self.state.velocity.x = -(self.state.velocity.x * conservation);
                }
            },
            [_, _] => {
                // Corner hit: reflect both components
                self.state.velocity.x = -(self.state.velocity.x * conservation);
                self.state.velocity.y = -(self.state.velocity.y * conservation);
            }
            _ => {}
        }

        if !query.is_outside_of(WallQuery::Any, candidate, OUTSIDE_TOLERANCE) {
            self.state.position = candidate;
        } else {
            log::debug!("rejected move to ({:.1}, {:.1})", candidate.x, candidate.y);
        }
        self.state.position
    }

    /// Sides collided with at the candidate position.
    ///
    /// Each side only counts while the velocity is heading into it, so at
    /// most one vertical and one horizontal side can collide per tick.
    fn collision_sides(&self, candidate: Vec2, query: &impl CollisionQuery) -> Vec<Side> {
        let v = self.state.velocity;
        let mut sides = Vec::with_capacity(2);
        if query.is_outside_of(WallQuery::Side(Side::Top), candidate, 0.0) && v.y < 0.0 {
            sides.push(Side::Top);
        }
        if query.is_outside_of(WallQuery::Side(Side::Bottom), candidate, 0.0) && v.y >= 0.0 {
            sides.push(Side::Bottom);
        }
        if query.is_outside_of(WallQuery::Side(Side::Left), candidate, 0.0) && v.x < 0.0 {
            sides.push(Side::Left);
        }
        if query.is_outside_of(WallQuery::Side(Side::Right), candidate, 0.0) && v.x >= 0.0 {
            sides.push(Side::Right);
        }
        sides
    }

    /// Sides the character is resting against at the candidate position:
    /// touching within tolerance with the matching velocity axis at rest.
    fn sliding_contact(&self, candidate: Vec2, query: &impl CollisionQuery) -> SlidingContact {
        let v = self.state.velocity;
        let min = self.tuning.min_speed;
        let settled_y = v.y.abs() < min;
        let settled_x = v.x.abs() < min;
        SlidingContact {
            top: settled_y
                && query.is_touched_of(WallQuery::Side(Side::Top), candidate, TOUCH_TOLERANCE),
            bottom: settled_y
                && query.is_touched_of(WallQuery::Side(Side::Bottom), candidate, TOUCH_TOLERANCE),
            left: settled_x
                && query.is_touched_of(WallQuery::Side(Side::Left), candidate, TOUCH_TOLERANCE),
            right: settled_x
                && query.is_touched_of(WallQuery::Side(Side::Right), candidate, TOUCH_TOLERANCE),
        }
    }
}
