//! Breakaway - a single-screen block-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, game state)
//! - `levels`: Level packs (block layouts, validation, built-in set)
//! - `config`: Playfield and tuning configuration
//! - `render`: Color and draw-sink contract for hosting clients

pub mod config;
pub mod levels;
pub mod render;
pub mod sim;

pub use config::GameConfig;
pub use levels::{LevelError, LevelSet};
pub use render::{draw_game, Color, RenderSink};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 224.0;
    pub const FIELD_HEIGHT: f32 = 288.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 50.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 150.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    /// Serve launch speed per axis; the launch vector is (±this, -this)
    pub const SERVE_SPEED: f32 = 100.0;
    /// Horizontal speed when the ball strikes the paddle's outer edge
    pub const BOUNCE_MAX_X_SPEED: f32 = 160.0;
    /// Upward speed after any paddle strike
    pub const BOUNCE_Y_SPEED: f32 = 110.0;

    /// Lives at the start of a fresh game
    pub const STARTING_LIVES: u32 = 3;

    /// Life indicator markers along the bottom-left
    pub const LIFE_MARKER_RADIUS: f32 = 5.0;
    pub const LIFE_MARKER_X: f32 = 7.0;
    pub const LIFE_MARKER_BOTTOM_OFFSET: f32 = 10.0;
    pub const LIFE_MARKER_SPACING: f32 = 17.0;
}
