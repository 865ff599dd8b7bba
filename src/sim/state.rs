//! Game state and core simulation types
//!
//! The entities (ball, paddle, blocks, walls) plus the aggregate the
//! per-frame state machine drives. Everything here is deterministic and
//! serializable; input arrives as queued commands and rendering happens
//! elsewhere.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{circle_overlaps_edge, circle_overlaps_rect, circle_rect_struck_face, reflect_velocity};
use super::geom::{AARect, BoundaryEdge, Circle, RectSide};
use crate::config::GameConfig;
use crate::consts::*;
use crate::levels::{LevelDescriptor, LevelSet};
use crate::render::Color;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball pinned to the paddle, waiting for launch input
    Serve,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart input
    GameOver,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    circle: Circle,
    velocity: Vec2,
    /// False while pinned to the paddle awaiting serve
    moving: bool,
}

impl Ball {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            circle: Circle::new(center, radius),
            velocity: Vec2::ZERO,
            moving: false,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.circle.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.circle.radius
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn circle(&self) -> &Circle {
        &self.circle
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Advance by velocity * dt
    ///
    /// No sub-stepping; tunneling through thin geometry at extreme speeds is
    /// an accepted limitation.
    pub fn update(&mut self, dt: f32) {
        self.circle.move_by(self.velocity * dt);
    }

    /// Reflect velocity off an edge and push the circle flush with it
    pub fn bounce_off(&mut self, edge: &BoundaryEdge) {
        self.velocity = reflect_velocity(self.velocity, edge.normal());
        let depth = self.circle.radius - edge.signed_distance(self.circle.center);
        if depth > 0.0 {
            self.circle.move_by(edge.normal() * depth);
        }
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.moving = true;
    }

    /// Launch from the serve pin: upward, with the horizontal sign following
    /// the paddle's current steering (drifting left serves left, otherwise
    /// right)
    pub fn launch(&mut self, paddle: &Paddle, speed: f32) {
        let x_sign = match paddle.direction() {
            PaddleDirection::Left => -1.0,
            _ => 1.0,
        };
        self.set_velocity(Vec2::new(x_sign * speed, -speed));
    }

    /// Zero the velocity (between lives and while serving)
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.moving = false;
    }

    /// Teleport; used by resets, never during physics
    pub fn move_to(&mut self, center: Vec2) {
        self.circle.move_to(center);
    }
}

/// Direction the paddle is being steered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleDirection {
    #[default]
    None,
    Left,
    Right,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    rect: AARect,
    direction: PaddleDirection,
    /// Playfield the paddle is clamped to
    bounds: AARect,
    /// Lateral steering speed
    speed: f32,
    /// Horizontal bounce speed at the outer edges (contact offset ±1)
    bounce_x_max: f32,
    /// Upward bounce speed, the same for every contact
    bounce_y: f32,
}

impl Paddle {
    pub fn new(rect: AARect, bounds: AARect, config: &GameConfig) -> Self {
        Self {
            rect,
            direction: PaddleDirection::None,
            bounds,
            speed: config.paddle_speed,
            bounce_x_max: config.bounce_x_max,
            bounce_y: config.bounce_y,
        }
    }

    #[inline]
    pub fn rect(&self) -> &AARect {
        &self.rect
    }

    #[inline]
    pub fn direction(&self) -> PaddleDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: PaddleDirection) {
        self.direction = direction;
    }

    /// Clear the direction, but only while it still matches the released
    /// one - releasing left must not cancel a right press issued after it
    pub fn release_direction(&mut self, direction: PaddleDirection) {
        if self.direction == direction {
            self.direction = PaddleDirection::None;
        }
    }

    /// Steer laterally, clamped inside the playfield. A non-moving ball is
    /// resting on the paddle, so it is re-pinned to track the movement.
    pub fn update(&mut self, dt: f32, ball: &mut Ball) {
        let dx = match self.direction {
            PaddleDirection::Left => -self.speed * dt,
            PaddleDirection::Right => self.speed * dt,
            PaddleDirection::None => 0.0,
        };
        if dx != 0.0 {
            let min_x = self.bounds.left();
            let max_x = self.bounds.right() - self.rect.width;
            let x = (self.rect.left() + dx).clamp(min_x, max_x);
            self.rect.move_to(Vec2::new(x, self.rect.top()));
        }
        if !ball.is_moving() {
            ball.move_to(self.serve_point(ball.radius()));
        }
    }

    /// Where a serving ball rests: top-center, just clear of the surface
    pub fn serve_point(&self, ball_radius: f32) -> Vec2 {
        Vec2::new(self.rect.center().x, self.rect.top() - ball_radius - 1.0)
    }

    /// Normalized horizontal contact position: -1 at the paddle's left edge,
    /// 0 at center, +1 at the right edge
    pub fn contact_offset(&self, point: Vec2) -> f32 {
        let half_width = self.rect.width / 2.0;
        ((point.x - self.rect.center().x) / half_width).clamp(-1.0, 1.0)
    }

    /// On overlap, relaunch the ball at an angle set by where along the
    /// paddle the contact happened: steep sideways at the edges, near
    /// vertical at the center, always upward. Returns whether the ball
    /// overlapped at all.
    pub fn bounce(&self, ball: &mut Ball) -> bool {
        if !circle_overlaps_rect(ball.circle(), &self.rect) {
            return false;
        }
        let offset = self.contact_offset(ball.position());
        ball.set_velocity(Vec2::new(offset * self.bounce_x_max, -self.bounce_y));
        true
    }
}

/// A destructible block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    rect: AARect,
    hp: u32,
    color: Color,
}

impl Block {
    pub fn new(rect: AARect, hp: u32, color: Color) -> Self {
        Self { rect, hp, color }
    }

    #[inline]
    pub fn rect(&self) -> &AARect {
        &self.rect
    }

    #[inline]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Absorb one hit; returns true when the block is destroyed
    pub fn damage(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        self.hp == 0
    }
}

/// One board of blocks, built from an already-parsed descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Live blocks in row-major load order; destroyed blocks are removed
    blocks: Vec<Block>,
}

impl Level {
    pub fn from_descriptor(descriptor: &LevelDescriptor) -> Self {
        let blocks = descriptor
            .blocks
            .iter()
            .map(|desc| {
                Block::new(
                    AARect::new(desc.position, desc.size.x, desc.size.y),
                    desc.hit_points,
                    desc.color,
                )
            })
            .collect();
        Self { blocks }
    }

    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// True once no live blocks remain
    pub fn is_complete(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Resolve at most one ball/block collision this frame
    ///
    /// The first overlapping block in row-major order takes the hit, the
    /// ball reflects off the struck face, and scanning stops. Damaged-out
    /// blocks are removed on the spot.
    pub fn update(&mut self, _dt: f32, ball: &mut Ball) {
        let Some((index, side)) = self.blocks.iter().enumerate().find_map(|(index, block)| {
            circle_rect_struck_face(ball.circle(), &block.rect).map(|side| (index, side))
        }) else {
            return;
        };
        let face = self.blocks[index].rect.face(side);
        if self.blocks[index].damage() {
            log::debug!("block {} destroyed", index);
            self.blocks.remove(index);
        }
        ball.bounce_off(&face);
    }
}

/// The playfield walls the ball bounces off
///
/// The bottom is deliberately absent: crossing it is ball loss, which the
/// state machine owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelBoundary {
    rect: AARect,
}

impl LevelBoundary {
    pub fn new(rect: AARect) -> Self {
        Self { rect }
    }

    #[inline]
    pub fn rect(&self) -> &AARect {
        &self.rect
    }

    /// The wall the ball currently overlaps, if any; left, right, then top.
    /// Edges are built on the fly with inward normals.
    pub fn check_collision(&self, ball: &Ball) -> Option<BoundaryEdge> {
        [RectSide::Left, RectSide::Right, RectSide::Top]
            .into_iter()
            .map(|side| self.rect.face(side).flipped())
            .find(|edge| circle_overlaps_edge(ball.circle(), edge))
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// All loaded levels; validated non-empty with an in-range start index
    pub levels: LevelSet,
    /// Current phase
    pub phase: GamePhase,
    /// Player lives; saturates at zero
    pub lives: u32,
    /// Index into the level set
    pub current_level: usize,
    /// Live board for the current level
    pub level: Level,
    pub boundary: LevelBoundary,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Crossing this y while playing loses the ball
    pub cutoff_y: f32,
}

impl GameState {
    /// Display name for HUD surfaces
    pub const NAME: &'static str = "Breakaway";

    /// Build a fresh game over a validated level set
    pub fn new(config: GameConfig, levels: LevelSet) -> Self {
        let playfield = AARect::new(Vec2::ZERO, config.field_width, config.field_height);
        let paddle = Self::starting_paddle(&config, playfield);
        let current_level = levels.start_index();
        let level = Level::from_descriptor(levels.level(current_level));
        let mut state = Self {
            phase: GamePhase::Serve,
            lives: config.starting_lives,
            current_level,
            level,
            boundary: LevelBoundary::new(playfield),
            paddle,
            ball: Ball::new(playfield.center(), BALL_RADIUS),
            cutoff_y: config.field_height - 2.0 * PADDLE_HEIGHT,
            config,
            levels,
        };
        state.set_to_serve();
        log::info!(
            "new game: level {} of {}, {} lives",
            state.current_level + 1,
            state.levels.len(),
            state.lives
        );
        state
    }

    /// Full reset: lives, level index, and board all return to their
    /// starting configuration
    pub fn reset_game(&mut self) {
        self.lives = self.config.starting_lives;
        self.current_level = self.levels.start_index();
        self.reset_board();
        log::info!(
            "game reset: level {}, {} lives",
            self.current_level + 1,
            self.lives
        );
    }

    /// Advance to the next level, wrapping past the last; lives carry over
    pub fn advance_level(&mut self) {
        self.current_level = (self.current_level + 1) % self.levels.len();
        self.reset_board();
        log::info!("level complete: now on level {}", self.current_level + 1);
    }

    /// Rebuild board, paddle, and ball placement for the current level
    fn reset_board(&mut self) {
        let playfield = AARect::new(Vec2::ZERO, self.config.field_width, self.config.field_height);
        self.level = Level::from_descriptor(self.levels.level(self.current_level));
        self.boundary = LevelBoundary::new(playfield);
        self.cutoff_y = self.config.field_height - 2.0 * PADDLE_HEIGHT;
        self.paddle = Self::starting_paddle(&self.config, playfield);
        self.ball = Ball::new(playfield.center(), BALL_RADIUS);
        self.set_to_serve();
    }

    /// Centered paddle three paddle-heights above the bottom
    fn starting_paddle(config: &GameConfig, playfield: AARect) -> Paddle {
        let rect = AARect::new(
            Vec2::new(
                config.field_width / 2.0 - PADDLE_WIDTH / 2.0,
                config.field_height - 3.0 * PADDLE_HEIGHT,
            ),
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
        );
        Paddle::new(rect, playfield, config)
    }

    /// Stop the ball and pin it above the paddle, entering the serve phase
    pub fn set_to_serve(&mut self) {
        self.phase = GamePhase::Serve;
        self.ball.stop();
        self.ball.move_to(self.paddle.serve_point(self.ball.radius()));
    }

    /// Lose one life; re-serve while lives remain, otherwise game over
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("game over");
        } else {
            log::info!("ball lost: {} lives remain", self.lives);
            self.set_to_serve();
        }
    }

    /// Has the ball fallen past the loss line?
    pub fn ball_past_cutoff(&self) -> bool {
        self.ball.position().y > self.cutoff_y
    }

    /// Phase label for HUD display
    pub fn status_string(&self) -> &'static str {
        match self.phase {
            GamePhase::Serve => "press space to serve",
            GamePhase::Playing => "in play",
            GamePhase::GameOver => "game over - press space to restart",
        }
    }
}
