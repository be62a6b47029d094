//! Fixed timestep simulation tick
//!
//! One tick is physics, then pipe scroll, then collision. Discrete inputs
//! are never applied mid-tick: the state machine consumes a [`FrameInput`]
//! before it lets the clock run.

use super::collision::{self, Verdict};
use super::physics;
use super::pipes;
use super::state::GameSession;
use crate::tuning::Tuning;

/// Discrete signals collected since the previous frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Tap/click/key: start a round or flap
    pub activate: bool,
    /// Replay button on the scoreboard
    pub replay: bool,
}

impl FrameInput {
    pub fn activate() -> Self {
        Self {
            activate: true,
            ..Default::default()
        }
    }

    pub fn replay() -> Self {
        Self {
            replay: true,
            ..Default::default()
        }
    }
}

/// Advance the session by one simulation tick
pub fn simulation_tick(session: &mut GameSession, tuning: &Tuning) -> Verdict {
    session.time_ticks += 1;
    physics::step(&mut session.player, tuning);
    pipes::scroll(&mut session.pipes, tuning);
    collision::detect(&mut session.player, &mut session.pipes, tuning)
}
