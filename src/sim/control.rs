//! Input/control state
//!
//! Raw device events become a single [`MovementIntent`] latch. Events are
//! last-writer-wins: each pointer-move or key transition overwrites the
//! latch, and the physics tick reads whatever is current at tick time. No
//! queueing.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::physics::Operation;

/// Compass-like directions the character can be accelerated toward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    LeftTop,
    LeftBottom,
    Down,
    RightBottom,
    RightTop,
    Right,
    Up,
    None,
}

impl MoveDirection {
    /// Fixed polar angle of each direction (0 = straight down, clockwise).
    pub fn angle(self) -> f32 {
        match self {
            MoveDirection::Left => -FRAC_PI_2,
            MoveDirection::LeftTop => PI / 3.0,
            MoveDirection::LeftBottom => PI / 6.0,
            MoveDirection::Down => 0.0,
            MoveDirection::RightBottom => -PI / 6.0,
            MoveDirection::RightTop => -PI / 3.0,
            MoveDirection::Right => FRAC_PI_2,
            MoveDirection::Up => PI,
            MoveDirection::None => 0.0,
        }
    }
}

/// Mutually exclusive movement modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentMode {
    /// Continuous pull derived from pointer position
    Slide,
    /// Direct thrust from a held arrow key
    Move,
    /// No active input
    Stand,
}

/// Discrete movement intent, derived from the latest device event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementIntent {
    pub mode: IntentMode,
    pub direction: MoveDirection,
}

impl Default for MovementIntent {
    fn default() -> Self {
        Self { mode: IntentMode::Stand, direction: MoveDirection::None }
    }
}

/// Keys the input boundary recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value; anything else is ignored input.
    pub fn from_event_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowUp" => Some(Key::ArrowUp),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Pointer bucket half-width: each slide zone spans π/5 radians
const ZONE: f32 = PI / 5.0;

/// The intent latch updated by device events
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlState {
    intent: MovementIntent,
}

impl ControlState {
    pub fn intent(&self) -> MovementIntent {
        self.intent
    }

    /// Pointer moved to `pointer` (client coords) on a canvas centered at
    /// `center`.
    ///
    /// Only pointer positions strictly below the center update the intent;
    /// at or above center the previous intent is retained. The angle of the
    /// center-to-pointer vector is bucketed into five π/5-wide zones over
    /// (−π/2, π/2), mapping left-to-right onto the slide directions.
    pub fn pointer_moved(&mut self, pointer: Vec2, center: Vec2) {
        if pointer.y <= center.y {
            return;
        }
        let angle = ((pointer.x - center.x) / (pointer.y - center.y)).atan();
        let edges = [
            -FRAC_PI_2,
            -FRAC_PI_2 + ZONE,
            -FRAC_PI_2 + 2.0 * ZONE,
            FRAC_PI_2 - 2.0 * ZONE,
            FRAC_PI_2 - ZONE,
            FRAC_PI_2,
        ];
        let zone = edges
            .windows(2)
            .position(|edge| edge[0] <= angle && edge[1] > angle);
        let direction = match zone {
            Some(0) => MoveDirection::LeftTop,
            Some(1) => MoveDirection::LeftBottom,
            Some(2) => MoveDirection::Down,
            Some(3) => MoveDirection::RightBottom,
            Some(4) => MoveDirection::RightTop,
            // atan never reaches ±π/2 exactly, but keep the latch unchanged
            // rather than inventing a direction
            _ => return,
        };
        self.intent = MovementIntent { mode: IntentMode::Slide, direction };
    }

    /// Arrow key pressed. Escape is a scheduler concern and leaves the latch
    /// alone.
    pub fn key_down(&mut self, key: Key) {
        let direction = match key {
            Key::ArrowLeft => MoveDirection::Left,
            Key::ArrowRight => MoveDirection::Right,
            Key::ArrowUp => MoveDirection::Up,
            Key::Escape => return,
        };
        self.intent = MovementIntent { mode: IntentMode::Move, direction };
    }

    /// Any key released resets to standing.
    pub fn key_up(&mut self) {
        self.intent = MovementIntent::default();
    }

    /// Click is reserved for a future jump action.
    pub fn pointer_clicked(&mut self) {}
}

/// Resolve an intent into the per-tick operation. Total: anything without a
/// defined mapping stands still.
pub fn operation_for(intent: MovementIntent) -> Operation {
    match intent.mode {
        IntentMode::Slide => match intent.direction {
            MoveDirection::Left => Operation::SlideLeft,
            MoveDirection::LeftTop => Operation::SlideLeftTop,
            MoveDirection::LeftBottom => Operation::SlideLeftBottom,
            MoveDirection::Down => Operation::SlideDown,
            MoveDirection::RightBottom => Operation::SlideRightBottom,
            MoveDirection::RightTop => Operation::SlideRightTop,
            MoveDirection::Right => Operation::SlideRight,
            MoveDirection::Up | MoveDirection::None => Operation::Stand,
        },
        IntentMode::Move => match intent.direction {
            MoveDirection::Left => Operation::MoveLeft,
            MoveDirection::Right => Operation::MoveRight,
            MoveDirection::Up => Operation::MoveUp,
            _ => Operation::Stand,
        },
        IntentMode::Stand => Operation::Stand,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> Vec2 {
        Vec2::new(400.0, 300.0)
    }

    #[test]
    fn test_pointer_above_center_retains_intent() {
        let mut control = ControlState::default();
        control.key_down(Key::ArrowLeft);
        control.pointer_moved(Vec2::new(500.0, 100.0), center());
        assert_eq!(control.intent().mode, IntentMode::Move);
        assert_eq!(control.intent().direction, MoveDirection::Left);
    }

    #[test]
    fn test_pointer_at_center_height_retains_intent() {
        let mut control = ControlState::default();
        control.pointer_moved(Vec2::new(500.0, 300.0), center());
        assert_eq!(control.intent(), MovementIntent::default());
    }

    #[test]
    fn test_pointer_straight_below_is_slide_down() {
        let mut control = ControlState::default();
        control.pointer_moved(Vec2::new(400.0, 500.0), center());
        assert_eq!(control.intent().mode, IntentMode::Slide);
        assert_eq!(control.intent().direction, MoveDirection::Down);
    }

    #[test]
    fn test_pointer_zones_sweep_left_to_right() {
        // Pick angles inside each zone and verify the bucket mapping
        let cases = [
            (-0.55 * FRAC_PI_2 - 0.6, MoveDirection::LeftTop),
            (-0.5, MoveDirection::LeftBottom),
            (0.0, MoveDirection::Down),
            (0.5, MoveDirection::RightBottom),
            (0.55 * FRAC_PI_2 + 0.6, MoveDirection::RightTop),
        ];
        for (angle, expected) in cases {
            let mut control = ControlState::default();
            // Point 100 px below center, offset so atan(dx/dy) == angle
            let pointer = center() + Vec2::new(angle.tan() * 100.0, 100.0);
            control.pointer_moved(pointer, center());
            assert_eq!(control.intent().direction, expected, "angle {angle}");
        }
    }

    #[test]
    fn test_key_lifecycle() {
        let mut control = ControlState::default();
        control.key_down(Key::ArrowUp);
        assert_eq!(operation_for(control.intent()), Operation::MoveUp);
        control.key_up();
        assert_eq!(operation_for(control.intent()), Operation::Stand);
    }

    #[test]
    fn test_escape_leaves_latch() {
        let mut control = ControlState::default();
        control.key_down(Key::ArrowRight);
        control.key_down(Key::Escape);
        assert_eq!(control.intent().direction, MoveDirection::Right);
    }

    #[test]
    fn test_operation_mapping_is_total() {
        // Every mode/direction combination resolves to some operation
        let directions = [
            MoveDirection::Left,
            MoveDirection::LeftTop,
            MoveDirection::LeftBottom,
            MoveDirection::Down,
            MoveDirection::RightBottom,
            MoveDirection::RightTop,
            MoveDirection::Right,
            MoveDirection::Up,
            MoveDirection::None,
        ];
        for mode in [IntentMode::Slide, IntentMode::Move, IntentMode::Stand] {
            for direction in directions {
                let _ = operation_for(MovementIntent { mode, direction });
            }
        }
    }

    #[test]
    fn test_slide_up_has_no_operation() {
        let intent = MovementIntent { mode: IntentMode::Slide, direction: MoveDirection::Up };
        assert_eq!(operation_for(intent), Operation::Stand);
    }

    #[test]
    fn test_unrecognized_dom_key_ignored() {
        assert_eq!(Key::from_event_key("Space"), None);
        assert_eq!(Key::from_event_key("ArrowDown"), None);
    }
}
