//! Game balance and geometry
//!
//! Loaded from JSON; any field left out falls back to the defaults in
//! [`crate::consts`]. Values are validated once at the boundary so the
//! simulation never has to clamp bad geometry.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    /// Simulation ticks per second
    pub sim_rate_hz: u32,
    /// Milliseconds between pipe spawns
    pub spawn_interval_ms: u64,

    // === Physics ===
    pub gravity: f32,
    pub jump_velocity: f32,
    pub rotation_per_velocity: f32,
    pub max_rotation_deg: f32,

    // === Fly area ===
    pub fly_area_height: f32,
    pub ceiling_y: f32,

    // === Player ===
    pub player_x: f32,
    pub player_start_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub hitbox_shrink: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_padding: f32,
    pub pipe_channel_height: f32,
    pub pipe_spawn_x: f32,
    pub pipe_retire_x: f32,
    pub pipe_scroll_per_tick: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sim_rate_hz: SIM_RATE_HZ,
            spawn_interval_ms: PIPE_SPAWN_INTERVAL_MS,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            rotation_per_velocity: ROTATION_PER_VELOCITY,
            max_rotation_deg: MAX_ROTATION_DEG,

            fly_area_height: FLY_AREA_HEIGHT,
            ceiling_y: CEILING_Y,

            player_x: PLAYER_X,
            player_start_y: PLAYER_START_Y,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            hitbox_shrink: HITBOX_SHRINK,

            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_padding: PIPE_PADDING,
            pipe_channel_height: PIPE_CHANNEL_HEIGHT,
            pipe_spawn_x: PIPE_SPAWN_X,
            pipe_retire_x: PIPE_RETIRE_X,
            pipe_scroll_per_tick: PIPE_SCROLL_PER_TICK,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(TuningError::Parse)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, TuningError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TuningError::Io(path.to_path_buf(), e))?;
        let tuning = Self::from_json(&content)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Period of the simulation tick
    pub fn sim_period(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.sim_rate_hz.max(1)))
    }

    /// Period of the pipe spawn tick
    pub fn spawn_period(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    /// Range of the random part of a pipe's top height
    pub fn pipe_constraint(&self) -> f32 {
        self.pipe_channel_height - self.pipe_gap - 2.0 * self.pipe_padding
    }

    /// Reject geometry the simulation cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.sim_rate_hz == 0 {
            return Err(TuningError::invalid("sim_rate_hz", "must be positive"));
        }
        if self.sim_period().is_zero() {
            return Err(TuningError::invalid(
                "sim_rate_hz",
                "must give a tick period of at least one nanosecond",
            ));
        }
        if self.spawn_interval_ms == 0 {
            return Err(TuningError::invalid("spawn_interval_ms", "must be positive"));
        }

        let finite = [
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("rotation_per_velocity", self.rotation_per_velocity),
            ("ceiling_y", self.ceiling_y),
            ("player_x", self.player_x),
            ("player_start_y", self.player_start_y),
            ("pipe_spawn_x", self.pipe_spawn_x),
            ("pipe_retire_x", self.pipe_retire_x),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::invalid(field, "must be finite"));
            }
        }

        let positive = [
            ("max_rotation_deg", self.max_rotation_deg),
            ("fly_area_height", self.fly_area_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("pipe_channel_height", self.pipe_channel_height),
            ("pipe_scroll_per_tick", self.pipe_scroll_per_tick),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::invalid(field, "must be positive"));
            }
        }

        let non_negative = [
            ("hitbox_shrink", self.hitbox_shrink),
            ("pipe_padding", self.pipe_padding),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::invalid(field, "must not be negative"));
            }
        }

        if self.max_rotation_deg > MAX_ROTATION_DEG {
            return Err(TuningError::invalid(
                "max_rotation_deg",
                "must not exceed 90 degrees",
            ));
        }
        if self.hitbox_shrink >= self.player_width {
            return Err(TuningError::invalid(
                "hitbox_shrink",
                "must be smaller than player_width",
            ));
        }
        if self.pipe_constraint() < 0.0 {
            return Err(TuningError::invalid(
                "pipe_channel_height",
                "must fit pipe_gap plus padding on both sides",
            ));
        }
        if self.pipe_retire_x >= self.pipe_spawn_x {
            return Err(TuningError::invalid(
                "pipe_retire_x",
                "must be left of pipe_spawn_x",
            ));
        }
        Ok(())
    }
}

/// Errors that can occur when loading tuning
#[derive(Debug)]
pub enum TuningError {
    Io(std::path::PathBuf, std::io::Error),
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl TuningError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        TuningError::Invalid { field, reason }
    }
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(path, e) => write!(f, "Failed to read {}: {}", path.display(), e),
            TuningError::Parse(e) => write!(f, "Failed to parse tuning: {}", e),
            TuningError::Invalid { field, reason } => {
                write!(f, "Invalid tuning: {} {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(_, e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}
