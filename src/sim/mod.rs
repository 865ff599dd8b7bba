//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Input as queued commands, drained once per tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod state;
pub mod tick;

pub use collision::{
    circle_overlaps_edge, circle_overlaps_rect, circle_rect_struck_face, rects_overlap,
    reflect_velocity,
};
pub use geom::{AARect, BoundaryEdge, Circle, RectSide, Shape};
pub use state::{
    Ball, Block, GamePhase, GameState, Level, LevelBoundary, Paddle, PaddleDirection,
};
pub use tick::{InputCommand, tick};
