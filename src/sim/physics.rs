//! Vertical motion of the player
//!
//! Integration is per tick, not per second: velocity is in units/tick and
//! gravity in units/tick². Position is unbounded here; the ground and
//! ceiling are the collision detector's business.

use super::state::PlayerBody;
use crate::tuning::Tuning;

/// Advance the body by one simulation tick
pub fn step(body: &mut PlayerBody, tuning: &Tuning) {
    body.velocity += tuning.gravity;
    body.position += body.velocity;
}

/// Flap: overwrite velocity with the jump velocity
pub fn jump(body: &mut PlayerBody, tuning: &Tuning) {
    body.velocity = tuning.jump_velocity;
}
