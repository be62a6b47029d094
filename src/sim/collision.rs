//! Collision detection and scoring
//!
//! The only place that decides whether the player died or cleared a pipe.
//! Checks run in a fixed order and the first decisive one wins:
//! ground, ceiling (soft stop), then the nearest pipe.

use super::state::{PipeField, PlayerBody};
use crate::tuning::Tuning;

/// Outcome of one collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing happened
    Alive,
    /// Still alive and just cleared the pipe with this ID
    Passed(u32),
    /// Hit the ground or a pipe
    Dead,
}

/// Run the collision checks for the current tick
///
/// May clamp the body to the ceiling, and moves a cleared pipe from the
/// front of `pipes.ahead` to `pipes.behind`.
pub fn detect(player: &mut PlayerBody, pipes: &mut PipeField, tuning: &Tuning) -> Verdict {
    let sprite = player.sprite_box(tuning);
    let hitbox = player.hitbox(tuning);

    if sprite.bottom() >= tuning.fly_area_height {
        return Verdict::Dead;
    }

    // Ceiling is a soft stop, the rest of the pass keeps the pre-clamp box
    if hitbox.top() <= tuning.ceiling_y {
        player.position = tuning.ceiling_y;
    }

    let Some(&pipe) = pipes.next() else {
        return Verdict::Alive;
    };

    if hitbox.right() > pipe.left() {
        let gap = pipe.gap_box();
        let in_gap = hitbox.top() > gap.top() && hitbox.bottom() < gap.bottom();
        if !in_gap {
            return Verdict::Dead;
        }
    }

    if hitbox.left() > pipe.right() && !pipe.scored {
        if let Some(passed) = pipes.pass_front() {
            return Verdict::Passed(passed.id);
        }
    }

    Verdict::Alive
}
