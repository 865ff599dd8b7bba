//! Game configuration
//!
//! The values the hosting environment supplies at reset time. Loaded once by
//! the harness; the simulation re-reads them only across resets.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    // === Playfield ===
    /// Playfield width in world units
    pub field_width: f32,
    /// Playfield height in world units
    pub field_height: f32,

    // === Rules ===
    /// Lives at the start of a game
    pub starting_lives: u32,

    // === Tuning ===
    /// Lateral paddle speed (units/second)
    pub paddle_speed: f32,
    /// Speed of each velocity component at serve
    pub serve_speed: f32,
    /// Horizontal ball speed when struck at the paddle's outer edge
    pub bounce_x_max: f32,
    /// Upward ball speed off the paddle, identical for every contact
    pub bounce_y: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: consts::FIELD_WIDTH,
            field_height: consts::FIELD_HEIGHT,
            starting_lives: consts::STARTING_LIVES,
            paddle_speed: consts::PADDLE_SPEED,
            serve_speed: consts::SERVE_SPEED,
            bounce_x_max: consts::BOUNCE_MAX_X_SPEED,
            bounce_y: consts::BOUNCE_Y_SPEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trips_through_json() {
        let config = GameConfig {
            field_width: 320.0,
            starting_lives: 5,
            ..GameConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_default_matches_consts() {
        let config = GameConfig::default();
        assert_eq!(config.field_width, consts::FIELD_WIDTH);
        assert_eq!(config.starting_lives, consts::STARTING_LIVES);
    }
}
