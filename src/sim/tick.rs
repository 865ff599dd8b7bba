//! Fixed timestep simulation tick
//!
//! Drains the frame's queued input commands, then advances the state machine
//! deterministically: paddle bounce, then walls, then blocks, resolving at
//! most one collision per frame.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState, PaddleDirection};

/// Discrete input commands
///
/// The harness pushes these as key events arrive; the state machine drains
/// the queue once per tick, so no callback ever reaches into game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputCommand {
    MoveLeftPressed,
    MoveLeftReleased,
    MoveRightPressed,
    MoveRightReleased,
    ServePressed,
}

/// Advance the game state by one fixed timestep
///
/// Commands are consumed in arrival order before any physics runs, so input
/// handling can never interleave with collision resolution within a frame.
pub fn tick(state: &mut GameState, commands: &mut VecDeque<InputCommand>, dt: f32) {
    while let Some(command) = commands.pop_front() {
        apply_command(state, command);
    }

    match state.phase {
        GamePhase::Serve => {
            // Paddle steering drags the pinned ball along
            state.paddle.update(dt, &mut state.ball);
        }
        GamePhase::Playing => {
            state.ball.update(dt);
            state.paddle.update(dt, &mut state.ball);

            if state.paddle.bounce(&mut state.ball) {
                return;
            }
            if let Some(edge) = state.boundary.check_collision(&state.ball) {
                state.ball.bounce_off(&edge);
                return;
            }
            state.level.update(dt, &mut state.ball);

            if state.ball_past_cutoff() {
                state.lose_life();
            } else if state.level.is_complete() {
                state.advance_level();
            }
        }
        GamePhase::GameOver => {
            // No physics; restart arrives through the command queue
        }
    }
}

fn apply_command(state: &mut GameState, command: InputCommand) {
    match state.phase {
        GamePhase::Serve | GamePhase::Playing => match command {
            InputCommand::MoveLeftPressed => state.paddle.set_direction(PaddleDirection::Left),
            InputCommand::MoveLeftReleased => {
                state.paddle.release_direction(PaddleDirection::Left)
            }
            InputCommand::MoveRightPressed => state.paddle.set_direction(PaddleDirection::Right),
            InputCommand::MoveRightReleased => {
                state.paddle.release_direction(PaddleDirection::Right)
            }
            InputCommand::ServePressed => {
                if state.phase == GamePhase::Serve {
                    state.ball.launch(&state.paddle, state.config.serve_speed);
                    state.phase = GamePhase::Playing;
                    log::debug!("serve: ball launched");
                }
            }
        },
        GamePhase::GameOver => {
            if command == InputCommand::ServePressed {
                state.reset_game();
            }
        }
    }
}
