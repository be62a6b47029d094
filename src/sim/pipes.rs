//! Pipe generation and lifecycle
//!
//! Spawn ticks retire off-screen pipes and add one new pipe at the right
//! edge. Simulation ticks scroll everything left at a constant rate.

use rand::Rng;

use super::state::{GameEvent, GameSession, Pipe, PipeField};
use crate::tuning::Tuning;

/// Gap geometry from a uniform sample `roll` in `[0, 1)`
///
/// Returns `(top_height, bottom_height)`. Both are at least `pipe_padding`,
/// and `top + gap + bottom == pipe_channel_height`.
pub fn pipe_heights(roll: f32, tuning: &Tuning) -> (f32, f32) {
    let roll = roll.clamp(0.0, 1.0);
    let constraint = tuning.pipe_constraint();
    let top = (roll * constraint).floor() + tuning.pipe_padding;
    let bottom = tuning.pipe_channel_height - tuning.pipe_gap - top;
    (top, bottom)
}

/// Build a pipe at the spawn edge
pub fn make_pipe(id: u32, roll: f32, tuning: &Tuning) -> Pipe {
    let (top, _bottom) = pipe_heights(roll, tuning);
    Pipe {
        id,
        x: tuning.pipe_spawn_x,
        width: tuning.pipe_width,
        gap_top: top,
        gap_bottom: top + tuning.pipe_gap,
        scored: false,
    }
}

/// Spawn tick: retire off-screen pipes, then add a new one
pub fn spawn_tick(session: &mut GameSession, tuning: &Tuning) {
    for pipe in session.pipes.retire_left_of(tuning.pipe_retire_x) {
        log::debug!("Pipe {} retired at x={:.1}", pipe.id, pipe.x);
        session.emit(GameEvent::PipeRemoved(pipe));
    }

    let roll: f32 = session.rng.random();
    let id = session.next_pipe_id();
    let pipe = make_pipe(id, roll, tuning);
    log::debug!(
        "Pipe {} spawned, gap {:.0}..{:.0}",
        pipe.id,
        pipe.gap_top,
        pipe.gap_bottom
    );
    session.pipes.ahead.push_back(pipe);
    session.emit(GameEvent::PipeSpawned(pipe));
}

/// Simulation tick: scroll every pipe left
pub fn scroll(pipes: &mut PipeField, tuning: &Tuning) {
    pipes.scroll(tuning.pipe_scroll_per_tick);
}
