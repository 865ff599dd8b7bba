//! Render facade
//!
//! `Color`, the primitive draw sink a client implements, and the scene-draw
//! routine. The simulation owns what is drawn and in what order; the sink
//! owns pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{
    LIFE_MARKER_BOTTOM_OFFSET, LIFE_MARKER_RADIUS, LIFE_MARKER_SPACING, LIFE_MARKER_X,
};
use crate::sim::geom::{Circle, Shape};
use crate::sim::state::GameState;

/// An RGB color, serialized as a `[r, g, b]` array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::new(228, 228, 228);
    pub const SILVER: Color = Color::new(142, 142, 142);
    pub const RED: Color = Color::new(200, 72, 72);
    pub const ORANGE: Color = Color::new(198, 108, 58);
    pub const YELLOW: Color = Color::new(196, 180, 84);
    pub const GREEN: Color = Color::new(72, 160, 72);
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b]
    }
}

/// Primitive draw sink the hosting client implements
pub trait RenderSink {
    /// Draw one shape in one color, filled or outlined
    fn draw(&mut self, shape: &Shape, color: Color, fill: bool);
}

/// Draw the whole scene
///
/// One sink call per element: the boundary outline, each live block, the
/// paddle, the ball, then one marker per remaining life along the bottom
/// left.
pub fn draw_game(state: &GameState, sink: &mut dyn RenderSink) {
    sink.draw(&Shape::Rect(*state.boundary.rect()), Color::WHITE, false);
    for block in state.level.blocks() {
        sink.draw(&Shape::Rect(*block.rect()), block.color(), true);
    }
    sink.draw(&Shape::Rect(*state.paddle.rect()), Color::WHITE, true);
    sink.draw(&Shape::Circle(*state.ball.circle()), Color::WHITE, true);
    for life in 0..state.lives {
        let center = Vec2::new(
            LIFE_MARKER_X + life as f32 * LIFE_MARKER_SPACING,
            state.config.field_height - LIFE_MARKER_BOTTOM_OFFSET,
        );
        sink.draw(
            &Shape::Circle(Circle::new(center, LIFE_MARKER_RADIUS)),
            Color::WHITE,
            true,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::levels::{BlockDescriptor, LevelDescriptor, LevelSet};

    struct CountingSink {
        calls: Vec<(Shape, Color, bool)>,
    }

    impl RenderSink for CountingSink {
        fn draw(&mut self, shape: &Shape, color: Color, fill: bool) {
            self.calls.push((*shape, color, fill));
        }
    }

    fn three_block_state() -> GameState {
        let levels = LevelSet::new(
            vec![LevelDescriptor {
                blocks: (0..3)
                    .map(|col| BlockDescriptor {
                        position: Vec2::new(col as f32 * 16.0, 40.0),
                        size: Vec2::new(16.0, 8.0),
                        hit_points: 1,
                        color: Color::RED,
                    })
                    .collect(),
            }],
            0,
        )
        .unwrap();
        GameState::new(GameConfig::default(), levels)
    }

    #[test]
    fn test_draw_game_issues_one_call_per_element() {
        let state = three_block_state();
        let mut sink = CountingSink { calls: Vec::new() };
        draw_game(&state, &mut sink);

        // Boundary + paddle + ball, plus one per block and per life
        let expected = 3 + 3 + state.lives as usize;
        assert_eq!(sink.calls.len(), expected);

        // Boundary comes first and is the only outline
        assert!(!sink.calls[0].2);
        assert!(sink.calls[1..].iter().all(|(_, _, fill)| *fill));
        assert!(matches!(sink.calls[0].0, Shape::Rect(_)));
    }

    #[test]
    fn test_draw_game_blocks_keep_their_colors() {
        let state = three_block_state();
        let mut sink = CountingSink { calls: Vec::new() };
        draw_game(&state, &mut sink);

        for call in &sink.calls[1..4] {
            assert_eq!(call.1, Color::RED);
        }
    }

    #[test]
    fn test_draw_game_life_markers_step_rightward() {
        let state = three_block_state();
        let mut sink = CountingSink { calls: Vec::new() };
        draw_game(&state, &mut sink);

        let markers: Vec<Vec2> = sink.calls[sink.calls.len() - state.lives as usize..]
            .iter()
            .map(|(shape, _, _)| shape.center_point())
            .collect();
        assert_eq!(markers.len(), state.lives as usize);
        for pair in markers.windows(2) {
            assert_eq!(pair[1].x - pair[0].x, LIFE_MARKER_SPACING);
            assert_eq!(pair[1].y, pair[0].y);
        }
    }

    #[test]
    fn test_color_serde_is_a_compact_array() {
        let json = serde_json::to_string(&Color::new(200, 72, 72)).unwrap();
        assert_eq!(json, "[200,72,72]");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::RED);
    }
}
