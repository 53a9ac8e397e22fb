//! Collision/interaction resolver
//!
//! Answers two questions about a candidate character position: has it crossed
//! a bound (border or obstacle) by more than a tolerance, and is it resting
//! against one within a tolerance. Both are pure functions of the track and
//! the character's collision envelope, so the engine can call them every tick
//! and get identical answers for identical inputs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Side};
use super::track::Track;

/// Fixed offsets from the character's center to its collision rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEnvelope {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl CollisionEnvelope {
    /// The character's bounding rectangle at a given center position.
    pub fn bounds_at(&self, pos: Vec2) -> Rect {
        Rect::from_edges(
            pos.x - self.left,
            pos.y - self.top,
            pos.x + self.right,
            pos.y + self.bottom,
        )
    }
}

/// A side selector for collision queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallQuery {
    Side(Side),
    Any,
}

impl WallQuery {
    #[inline]
    fn matches(self, side: Side) -> bool {
        match self {
            WallQuery::Side(s) => s == side,
            WallQuery::Any => true,
        }
    }
}

/// Collision capability consumed by the physics engine
pub trait CollisionQuery {
    /// True if the character at `pos` crosses the selected bound by more
    /// than `tolerance` pixels.
    fn is_outside_of(&self, wall: WallQuery, pos: Vec2, tolerance: f32) -> bool;

    /// True if the character at `pos` is within `tolerance` pixels of the
    /// selected bound (sliding contact).
    fn is_touched_of(&self, wall: WallQuery, pos: Vec2, tolerance: f32) -> bool;
}

/// Resolver over one track and one character envelope
#[derive(Debug, Clone)]
pub struct Interaction {
    envelope: CollisionEnvelope,
    track: Track,
}

impl Interaction {
    pub fn new(envelope: CollisionEnvelope, track: Track) -> Self {
        Self { envelope, track }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }
}

impl CollisionQuery for Interaction {
    fn is_outside_of(&self, wall: WallQuery, pos: Vec2, tolerance: f32) -> bool {
        let border = &self.track.border;
        let env = &self.envelope;

        // Border walls. Top/left cross below their coordinate, bottom/right
        // at-or-above theirs; the strict/inclusive asymmetry is deliberate.
        if pos.y - env.top < border.top - tolerance && wall.matches(Side::Top) {
            return true;
        }
        if pos.y + env.bottom >= border.bottom + tolerance && wall.matches(Side::Bottom) {
            return true;
        }
        if pos.x - env.left < border.left - tolerance && wall.matches(Side::Left) {
            return true;
        }
        if pos.x + env.right >= border.right + tolerance && wall.matches(Side::Right) {
            return true;
        }

        // Obstacles: penetration axis decides whether the hit counts as a
        // vertical or horizontal side, then the deeper half decides which.
        // Exact ties match no side.
        let bounds = env.bounds_at(pos);
        for obstacle in &self.track.obstacles {
            if !bounds.intersects(obstacle) {
                continue;
            }
            let is = bounds.intersection(obstacle);
            if is.w <= tolerance && is.h <= tolerance {
                continue;
            }
            if is.w > is.h {
                // Contact band is wide: top or bottom
                let above = (is.y1() - pos.y).abs();
                let below = (is.y2() - pos.y).abs();
                if above > below && wall.matches(Side::Top) {
                    return true;
                }
                if above < below && wall.matches(Side::Bottom) {
                    return true;
                }
            } else {
                let before = (is.x1() - pos.x).abs();
                let after = (is.x2() - pos.x).abs();
                if before > after && wall.matches(Side::Left) {
                    return true;
                }
                if before < after && wall.matches(Side::Right) {
                    return true;
                }
            }
        }
        false
    }

    fn is_touched_of(&self, wall: WallQuery, pos: Vec2, tolerance: f32) -> bool {
        let border = &self.track.border;
        let env = &self.envelope;

        if (pos.y - env.top - border.top).abs() <= tolerance && wall.matches(Side::Top) {
            return true;
        }
        if (pos.y + env.bottom - border.bottom).abs() <= tolerance && wall.matches(Side::Bottom) {
            return true;
        }
        if (pos.x - env.left - border.left).abs() <= tolerance && wall.matches(Side::Left) {
            return true;
        }
        if (pos.x + env.right - border.right).abs() <= tolerance && wall.matches(Side::Right) {
            return true;
        }

        let bounds = env.bounds_at(pos);
        for obstacle in &self.track.obstacles {
            if let Some(touch) = bounds.touching(obstacle, tolerance) {
                if wall.matches(touch.side) {
                    return true;
                }
            }
        }
        false
    }
}
