//! Demo player
//!
//! Produces the same discrete signals a human would: start from the splash
//! screen, flap to stay near the lower part of the next gap, and hit replay
//! on the scoreboard.

use super::state::{GamePhase, GameSession};
use super::tick::FrameInput;
use crate::tuning::Tuning;

/// How far above the gap bottom the body's centre is kept
const GAP_BOTTOM_MARGIN: f32 = 26.0;

/// Height to aim for: low in the next gap, or mid-screen with no pipe ahead
pub fn target_height(session: &GameSession, tuning: &Tuning) -> f32 {
    match session.pipes.next() {
        Some(pipe) => pipe.gap_bottom - GAP_BOTTOM_MARGIN,
        None => tuning.fly_area_height / 2.0,
    }
}

/// Whether a flap now keeps the body from sinking below the target
pub fn wants_flap(session: &GameSession, tuning: &Tuning) -> bool {
    let center = session.player.center(tuning).y;
    center + session.player.velocity >= target_height(session, tuning)
}

/// Inputs for the next frame
pub fn next_input(session: &GameSession, tuning: &Tuning) -> FrameInput {
    match session.phase() {
        GamePhase::Splash => FrameInput::activate(),
        GamePhase::Playing if wants_flap(session, tuning) => FrameInput::activate(),
        GamePhase::Playing => FrameInput::default(),
        GamePhase::ScoreDisplay => FrameInput::replay(),
    }
}
