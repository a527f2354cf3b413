//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, fixed increments (no delta-time scaling)
//! - Wall-clock time only enters through the `now` argument of `tick`
//! - Stable iteration order (platforms in list order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod input;
pub mod level;
pub mod state;
pub mod tick;

pub use clock::{StepClock, StepMode};
pub use collision::{Landing, goal_touched, horizontal_overlap, swept_landing};
pub use input::{Direction, InputState};
pub use level::setup_level;
pub use state::{
    GameEvent, GamePhase, GameState, Goal, Level, PendingRestart, Platform, Player, PlayerColor,
};
pub use tick::tick;
