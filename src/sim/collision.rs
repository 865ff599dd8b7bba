//! Collision detection and response for axis-aligned geometry
//!
//! Overlap tests for the three pairings the game needs (rect/rect,
//! circle/rect, circle/edge) plus struck-face selection for block hits and
//! the reflection used by every bounce.
//!
//! Circle/rect uses the clamp method: clamp the circle center into the
//! rectangle and compare the clamped-point distance against the radius.

use glam::Vec2;

use super::geom::{AARect, BoundaryEdge, Circle, RectSide};

/// Overlap test for two axis-aligned rectangles (touching edges do not count)
pub fn rects_overlap(a: &AARect, b: &AARect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Overlap test for a circle against a rectangle
pub fn circle_overlaps_rect(circle: &Circle, rect: &AARect) -> bool {
    let closest = rect.clamp_point(circle.center);
    (circle.center - closest).length_squared() < circle.radius * circle.radius
}

/// Overlap test for a circle against an edge segment
pub fn circle_overlaps_edge(circle: &Circle, edge: &BoundaryEdge) -> bool {
    let closest = edge.closest_point(circle.center);
    (circle.center - closest).length_squared() < circle.radius * circle.radius
}

/// Which face of `rect` an overlapping circle struck
///
/// Picks the axis with the larger center-to-clamped-point separation; ties
/// (exact corner contact) and a fully-contained center both resolve to the
/// top/bottom faces so the pick stays deterministic. Returns `None` when the
/// shapes do not overlap.
pub fn circle_rect_struck_face(circle: &Circle, rect: &AARect) -> Option<RectSide> {
    if !circle_overlaps_rect(circle, rect) {
        return None;
    }
    let delta = circle.center - rect.clamp_point(circle.center);
    let side = if delta.x.abs() > delta.y.abs() {
        if delta.x < 0.0 {
            RectSide::Left
        } else {
            RectSide::Right
        }
    } else if delta.y < 0.0 {
        RectSide::Top
    } else {
        RectSide::Bottom
    };
    Some(side)
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
