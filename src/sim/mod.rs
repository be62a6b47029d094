//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, on a virtual clock
//! - Seeded RNG only
//! - Pipes kept in creation order
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod machine;
pub mod physics;
pub mod pipes;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use collision::{Verdict, detect};
pub use machine::GameStateMachine;
pub use scheduler::{Scheduler, Task};
pub use state::{Aabb, GameEvent, GamePhase, GameSession, Pipe, PipeField, PlayerBody};
pub use tick::{FrameInput, simulation_tick};
