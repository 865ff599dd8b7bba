//! Axis-aligned geometry for the playfield
//!
//! Everything on screen is one of two shapes, in screen coordinates
//! (y grows downward):
//! - `AARect`: top-left anchored rectangle (paddle, blocks, playfield bounds)
//! - `Circle`: ball and life markers
//!
//! `BoundaryEdge` is a wall or block face paired with the unit normal a
//! bounce reflects off. Edges are built transiently by collision callers and
//! never stored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AARect {
    /// Top-left corner (minimum x and y)
    pub top_left: Vec2,
    pub width: f32,
    pub height: f32,
}

impl AARect {
    pub fn new(top_left: Vec2, width: f32, height: f32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    /// Rectangle centered on a point
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            top_left: center - Vec2::new(width, height) / 2.0,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.top_left.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.top_left.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.top_left.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top_left.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        self.top_left + Vec2::new(self.width, self.height) / 2.0
    }

    pub fn move_by(&mut self, offset: Vec2) {
        self.top_left += offset;
    }

    pub fn move_to(&mut self, top_left: Vec2) {
        self.top_left = top_left;
    }

    /// Nearest point to `point` inside or on the rectangle
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.left(), self.right()),
            point.y.clamp(self.top(), self.bottom()),
        )
    }

    /// One face of the rectangle, normal pointing away from the rectangle
    pub fn face(&self, side: RectSide) -> BoundaryEdge {
        let tl = self.top_left;
        let tr = Vec2::new(self.right(), self.top());
        let bl = Vec2::new(self.left(), self.bottom());
        let br = Vec2::new(self.right(), self.bottom());
        match side {
            RectSide::Left => BoundaryEdge::new(tl, bl, Vec2::NEG_X),
            RectSide::Right => BoundaryEdge::new(tr, br, Vec2::X),
            RectSide::Top => BoundaryEdge::new(tl, tr, Vec2::NEG_Y),
            RectSide::Bottom => BoundaryEdge::new(bl, br, Vec2::Y),
        }
    }
}

/// Circle: center point plus radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn move_by(&mut self, offset: Vec2) {
        self.center += offset;
    }

    pub fn move_to(&mut self, center: Vec2) {
        self.center = center;
    }
}

/// The four faces of an `AARect`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RectSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// A wall segment and the unit normal a bounce reflects off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryEdge {
    start: Vec2,
    end: Vec2,
    normal: Vec2,
}

impl BoundaryEdge {
    /// The normal is re-normalized so reflection math can assume unit length
    pub fn new(start: Vec2, end: Vec2, normal: Vec2) -> Self {
        Self {
            start,
            end,
            normal: normal.normalize(),
        }
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// Same segment with the normal pointing the other way
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            ..*self
        }
    }

    /// Signed distance from the edge line, positive on the normal's side
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        (point - self.start).dot(self.normal)
    }

    /// Closest point to `point` on the segment (endpoints included)
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        let seg = self.end - self.start;
        let len_sq = seg.length_squared();
        if len_sq <= f32::EPSILON {
            return self.start;
        }
        let t = ((point - self.start).dot(seg) / len_sq).clamp(0.0, 1.0);
        self.start + seg * t
    }
}

/// Drawable shape kinds - a closed set, so a tagged variant instead of a trait
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect(AARect),
    Circle(Circle),
}

impl Shape {
    /// Geometric center of the shape
    pub fn center_point(&self) -> Vec2 {
        match self {
            Shape::Rect(rect) => rect.center(),
            Shape::Circle(circle) => circle.center,
        }
    }

    /// Translate the shape by an offset
    pub fn move_by(&mut self, offset: Vec2) {
        match self {
            Shape::Rect(rect) => rect.move_by(offset),
            Shape::Circle(circle) => circle.move_by(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_sides_and_center() {
        let rect = AARect::new(Vec2::new(10.0, 20.0), 40.0, 8.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 50.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 28.0);
        assert_eq!(rect.center(), Vec2::new(30.0, 24.0));
    }

    #[test]
    fn test_rect_from_center_round_trips() {
        let rect = AARect::from_center(Vec2::new(30.0, 24.0), 40.0, 8.0);
        assert_eq!(rect.top_left, Vec2::new(10.0, 20.0));
        assert_eq!(rect.center(), Vec2::new(30.0, 24.0));
    }

    #[test]
    fn test_rect_clamp_point() {
        let rect = AARect::new(Vec2::ZERO, 10.0, 10.0);
        // Inside stays put
        assert_eq!(rect.clamp_point(Vec2::new(3.0, 7.0)), Vec2::new(3.0, 7.0));
        // Outside snaps to the nearest edge or corner
        assert_eq!(rect.clamp_point(Vec2::new(-5.0, 5.0)), Vec2::new(0.0, 5.0));
        assert_eq!(
            rect.clamp_point(Vec2::new(20.0, -3.0)),
            Vec2::new(10.0, 0.0)
        );
    }

    #[test]
    fn test_rect_face_normals_point_outward() {
        let rect = AARect::new(Vec2::ZERO, 10.0, 10.0);
        assert_eq!(rect.face(RectSide::Left).normal(), Vec2::NEG_X);
        assert_eq!(rect.face(RectSide::Right).normal(), Vec2::X);
        assert_eq!(rect.face(RectSide::Top).normal(), Vec2::NEG_Y);
        assert_eq!(rect.face(RectSide::Bottom).normal(), Vec2::Y);
    }

    #[test]
    fn test_edge_signed_distance() {
        // Playfield left wall with inward (rightward) normal
        let edge = BoundaryEdge::new(Vec2::ZERO, Vec2::new(0.0, 100.0), Vec2::X);
        assert_eq!(edge.signed_distance(Vec2::new(25.0, 50.0)), 25.0);
        assert_eq!(edge.signed_distance(Vec2::new(-4.0, 10.0)), -4.0);
    }

    #[test]
    fn test_edge_closest_point_clamps_to_segment() {
        let edge = BoundaryEdge::new(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::NEG_Y);
        assert_eq!(edge.closest_point(Vec2::new(4.0, 3.0)), Vec2::new(4.0, 0.0));
        // Beyond either endpoint the endpoint is the closest point
        assert_eq!(edge.closest_point(Vec2::new(-9.0, 2.0)), Vec2::ZERO);
        assert_eq!(
            edge.closest_point(Vec2::new(25.0, -1.0)),
            Vec2::new(10.0, 0.0)
        );
    }

    #[test]
    fn test_shape_center_and_move_by() {
        let mut shape = Shape::Rect(AARect::new(Vec2::ZERO, 10.0, 20.0));
        assert_eq!(shape.center_point(), Vec2::new(5.0, 10.0));
        shape.move_by(Vec2::new(3.0, -2.0));
        assert_eq!(shape.center_point(), Vec2::new(8.0, 8.0));

        let mut ball = Shape::Circle(Circle::new(Vec2::new(1.0, 1.0), 5.0));
        ball.move_by(Vec2::new(0.5, 0.5));
        assert_eq!(ball.center_point(), Vec2::new(1.5, 1.5));
    }
}
