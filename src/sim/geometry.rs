//! Vector, interval, and rectangle math
//!
//! Pure functions over value types; nothing here holds state. The interval
//! overlap predicate is exclusive at shared endpoints while the rectangle
//! overlap predicate is inclusive - the collision resolver depends on keeping
//! those two boundary rules distinct.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// A 2D quantity in polar form
///
/// The angle is measured from the downward (+y, canvas space) axis,
/// increasing clockwise toward +x. Invariant: `length >= 0`; the angle of a
/// zero-length vector is 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    pub length: f32,
    pub angle: f32,
}

impl Vector {
    /// Decompose a Cartesian coordinate into polar form.
    ///
    /// Uses `atan(x/y)` with explicit quadrant branches, not `atan2`: the
    /// direction buckets downstream rely on the ±π/2 saturation as `y`
    /// approaches 0, so the branch structure here is load-bearing.
    pub fn from_coord(c: Vec2) -> Self {
        let length = c.length();
        let angle = if c.y == 0.0 {
            if c.x == 0.0 {
                0.0
            } else if c.x > 0.0 {
                FRAC_PI_2
            } else {
                -FRAC_PI_2
            }
        } else if c.y > 0.0 {
            (c.x / c.y).atan()
        } else {
            (c.x / c.y).atan() + PI
        };
        Self { length, angle }
    }

    /// Recompose into Cartesian components: `x = L·sin(a)`, `y = L·cos(a)`.
    pub fn to_coord(self) -> Vec2 {
        Vec2::new(self.length * self.angle.sin(), self.length * self.angle.cos())
    }
}

/// Component-wise sum of a sequence of coordinates; empty yields zero.
pub fn sum_coords<I: IntoIterator<Item = Vec2>>(coords: I) -> Vec2 {
    coords.into_iter().fold(Vec2::ZERO, |acc, c| acc + c)
}

/// A 1D span on either axis, `c1 <= c2` for well-formed inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub c1: f32,
    pub c2: f32,
}

impl Interval {
    pub fn new(c1: f32, c2: f32) -> Self {
        Self { c1, c2 }
    }

    #[inline]
    pub fn len(&self) -> f32 {
        self.c2 - self.c1
    }
}

/// Overlap of two 1D spans.
///
/// Strict comparisons throughout: spans that merely share an endpoint
/// (`a.c2 == b.c1`) are disjoint, while coincident starts overlap. This is
/// the exclusive predicate; [`Rect::intersects`] is the inclusive one.
pub fn line_intersection(a: Interval, b: Interval) -> Option<Interval> {
    if a.c1 < b.c1 {
        if a.c2 > b.c1 {
            if a.c2 > b.c2 {
                // a1---b1===b2---a2
                Some(Interval::new(b.c1, b.c2))
            } else {
                // a1---b1===a2---b2
                Some(Interval::new(b.c1, a.c2))
            }
        } else {
            // a1---a2  b1---b2
            None
        }
    } else if a.c1 < b.c2 {
        if a.c2 < b.c2 {
            // b1---a1===a2---b2
            Some(Interval::new(a.c1, a.c2))
        } else {
            // b1---a1===b2---a2
            Some(Interval::new(a.c1, b.c2))
        }
    } else {
        // b1---b2  a1---a2
        None
    }
}

/// Which side of a rectangle an edge contact occurred on.
///
/// Declaration order is the touch-detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// An edge contact between two rectangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    /// Overlap interval along the touching edge
    pub span: Interval,
    /// Side of the first rectangle that touched
    pub side: Side,
}

/// Axis-aligned rectangle, origin + extents; `w, h >= 0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from the edge form; `x2 >= x1` and `y2 >= y1` expected.
    pub fn from_edges(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x: x1, y: y1, w: x2 - x1, h: y2 - y1 }
    }

    #[inline]
    pub fn x1(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y1(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn x2(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn y2(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn x_span(&self) -> Interval {
        Interval::new(self.x1(), self.x2())
    }

    #[inline]
    pub fn y_span(&self) -> Interval {
        Interval::new(self.y1(), self.y2())
    }

    /// Inclusive overlap test on both axes (edge contact counts).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1() <= other.x2()
            && self.x2() >= other.x1()
            && self.y1() <= other.y2()
            && self.y2() >= other.y1()
    }

    /// Intersection rectangle.
    ///
    /// An axis with no overlap yields zero extent on that axis rather than an
    /// absent result; callers test `w` / `h` against their tolerance.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = line_intersection(self.x_span(), other.x_span())
            .unwrap_or(Interval::new(0.0, 0.0));
        let y = line_intersection(self.y_span(), other.y_span())
            .unwrap_or(Interval::new(0.0, 0.0));
        Rect::from_edges(x.c1, y.c1, x.c2, y.c2)
    }

    /// Edge contact between `self` and `other` within `tolerance` pixels.
    ///
    /// Sides are evaluated Left, Right, Top, Bottom; the first facing-edge
    /// pair within tolerance decides the side, and if its perpendicular spans
    /// are disjoint the whole test reports no touch rather than trying the
    /// remaining sides. A corner-adjacent rectangle therefore reports at most
    /// one side.
    pub fn touching(&self, other: &Rect, tolerance: f32) -> Option<Touch> {
        if (self.x1() - other.x2()).abs() <= tolerance {
            line_intersection(self.y_span(), other.y_span())
                .map(|span| Touch { span, side: Side::Left })
        } else if (self.x2() - other.x1()).abs() <= tolerance {
            line_intersection(self.y_span(), other.y_span())
                .map(|span| Touch { span, side: Side::Right })
        } else if (self.y1() - other.y2()).abs() <= tolerance {
            line_intersection(self.x_span(), other.x_span())
                .map(|span| Touch { span, side: Side::Top })
        } else if (self.y2() - other.y1()).abs() <= tolerance {
            line_intersection(self.x_span(), other.x_span())
                .map(|span| Touch { span, side: Side::Bottom })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_polar_axes() {
        // Angle 0 is straight down in canvas space
        let down = Vector { length: 5.0, angle: 0.0 }.to_coord();
        assert!((down.x).abs() < 1e-6 && (down.y - 5.0).abs() < 1e-6);

        let right = Vector { length: 5.0, angle: FRAC_PI_2 }.to_coord();
        assert!((right.x - 5.0).abs() < 1e-6 && right.y.abs() < 1e-6);

        let up = Vector { length: 5.0, angle: PI }.to_coord();
        assert!(up.x.abs() < 1e-5 && (up.y + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_vector_angle_default() {
        let v = Vector::from_coord(Vec2::ZERO);
        assert_eq!(v.length, 0.0);
        assert_eq!(v.angle, 0.0);
    }

    #[test]
    fn test_horizontal_saturates_to_half_pi() {
        assert_eq!(Vector::from_coord(Vec2::new(3.0, 0.0)).angle, FRAC_PI_2);
        assert_eq!(Vector::from_coord(Vec2::new(-3.0, 0.0)).angle, -FRAC_PI_2);
    }

    #[test]
    fn test_sum_coords_empty() {
        assert_eq!(sum_coords(std::iter::empty()), Vec2::ZERO);
    }

    #[test]
    fn test_sum_coords() {
        let sum = sum_coords([Vec2::new(1.0, 2.0), Vec2::new(-4.0, 0.5)]);
        assert_eq!(sum, Vec2::new(-3.0, 2.5));
    }

    #[test]
    fn test_line_intersection_overlap() {
        let a = Interval::new(0.0, 10.0);
        let b = Interval::new(5.0, 15.0);
        assert_eq!(line_intersection(a, b), Some(Interval::new(5.0, 10.0)));
        assert_eq!(line_intersection(b, a), Some(Interval::new(5.0, 10.0)));
    }

    #[test]
    fn test_line_intersection_contained() {
        let outer = Interval::new(0.0, 10.0);
        let inner = Interval::new(2.0, 4.0);
        assert_eq!(line_intersection(outer, inner), Some(inner));
        assert_eq!(line_intersection(inner, outer), Some(inner));
    }

    #[test]
    fn test_line_intersection_endpoint_touch_is_disjoint() {
        // Shared endpoint only: exclusive predicate says no overlap
        let a = Interval::new(0.0, 5.0);
        let b = Interval::new(5.0, 10.0);
        assert_eq!(line_intersection(a, b), None);
    }

    #[test]
    fn test_line_intersection_coincident_starts_overlap() {
        let a = Interval::new(5.0, 8.0);
        let b = Interval::new(5.0, 10.0);
        assert_eq!(line_intersection(a, b), Some(Interval::new(5.0, 8.0)));
    }

    #[test]
    fn test_rect_intersection_disjoint_axis_is_zero_extent() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(2.0, 20.0, 4.0, 5.0);
        let is = a.intersection(&b);
        assert!(is.w > 0.0);
        assert_eq!(is.h, 0.0);
    }

    #[test]
    fn test_rects_intersect_edge_contact_inclusive() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 5.0, 5.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_touching_side_priority_at_corner() {
        // b sits diagonally off a's bottom-right corner, within tolerance of
        // both the right edge and the bottom edge; Right wins by priority.
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.5, 0.0, 5.0, 10.5);
        let touch = a.touching(&b, 1.0).expect("corner contact");
        assert_eq!(touch.side, Side::Right);
    }

    #[test]
    fn test_touching_first_side_match_is_final() {
        // Left edges within tolerance but y spans disjoint: the chain stops
        // at Left and reports nothing, even though the bottom edge would
        // also be within tolerance of b's top.
        let a = Rect::new(10.0, 0.0, 5.0, 10.0);
        let b = Rect::new(4.0, 10.5, 6.0, 5.0);
        assert_eq!(a.touching(&b, 1.0), None);
    }

    #[test]
    fn test_touching_reports_span() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 4.0, 5.0, 10.0);
        let touch = a.touching(&b, 0.0).expect("flush contact");
        assert_eq!(touch.side, Side::Right);
        assert_eq!(touch.span, Interval::new(4.0, 10.0));
    }

    proptest! {
        #[test]
        fn prop_polar_round_trip(x in -1000.0f32..1000.0, y in -1000.0f32..1000.0) {
            let c = Vec2::new(x, y);
            prop_assume!(c.length() > 1e-3);
            let back = Vector::from_coord(c).to_coord();
            let tol = 1e-3 * c.length().max(1.0);
            prop_assert!((back.x - c.x).abs() < tol, "x: {} vs {}", back.x, c.x);
            prop_assert!((back.y - c.y).abs() < tol, "y: {} vs {}", back.y, c.y);
        }

        #[test]
        fn prop_rects_intersect_symmetry(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            aw in 0.0f32..50.0, ah in 0.0f32..50.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            bw in 0.0f32..50.0, bh in 0.0f32..50.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }
}
