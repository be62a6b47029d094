//! Floppybird - simulation core of a side-scrolling flap game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, phase machine)
//! - `highscores`: Score, high score and medal bookkeeping
//! - `persistence`: High score storage collaborators
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod sim;
pub mod tuning;

pub use highscores::{Medal, ScoreTracker, medal_for};
pub use persistence::{HighScoreStore, MemoryStore, PersistError};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate (ticks per second)
    pub const SIM_RATE_HZ: u32 = 60;
    /// Pipe spawn interval
    pub const PIPE_SPAWN_INTERVAL_MS: u64 = 1400;

    /// Downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.25;
    /// Velocity set by a flap (negative is up)
    pub const JUMP_VELOCITY: f32 = -4.6;
    /// Degrees of rotation per unit of velocity (90° at velocity 10)
    pub const ROTATION_PER_VELOCITY: f32 = 9.0;
    /// Rotation magnitude cap in degrees
    pub const MAX_ROTATION_DEG: f32 = 90.0;

    /// Fly area: ceiling at the top edge, ground line at the bottom
    pub const FLY_AREA_HEIGHT: f32 = 420.0;
    pub const CEILING_Y: f32 = 0.0;

    /// Player sprite
    pub const PLAYER_X: f32 = 60.0;
    pub const PLAYER_START_Y: f32 = 180.0;
    pub const PLAYER_WIDTH: f32 = 34.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    /// Max hitbox narrowing when the sprite is rotated
    pub const HITBOX_SHRINK: f32 = 8.0;

    /// Pipes
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const PIPE_GAP: f32 = 100.0;
    pub const PIPE_PADDING: f32 = 80.0;
    /// top + gap + bottom always equals this
    pub const PIPE_CHANNEL_HEIGHT: f32 = 420.0;
    pub const PIPE_SPAWN_X: f32 = 900.0;
    pub const PIPE_RETIRE_X: f32 = -100.0;
    /// 1000 units in 7.5 s at 60 Hz
    pub const PIPE_SCROLL_PER_TICK: f32 = 1000.0 / 450.0;
}
