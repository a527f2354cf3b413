//! Coin Jump - a two-level side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, physics, levels, game phase)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser glue (key mapping, asset probing)
//! - `audio`: Web Audio cues (wasm32 only)
//! - `settings`: Persisted player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Step rate when running with a fixed-step clock
    pub const SIM_HZ: f32 = 60.0;
    /// Fixed simulation timestep (also the assumed length of the first frame)
    pub const SIM_DT: f32 = 1.0 / SIM_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World (canvas) dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 480.0;
    /// Top edge of every ground platform
    pub const GROUND_Y: f32 = 420.0;
    /// How far below the world the player may fall before the level is lost
    pub const FALL_MARGIN: f32 = 50.0;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 20.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;

    /// Vertical acceleration per tick (y grows downward)
    pub const GRAVITY: f32 = 0.6;
    /// Velocity set on jump
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// Extra lift per tick while airborne with up held
    pub const AIR_LIFT: f32 = 0.3;
    /// Extra pull per tick while airborne with down held
    pub const AIR_DIVE: f32 = 0.5;

    /// Horizontal speed per tick on each level
    pub const LEVEL_ONE_SPEED: f32 = 3.0;
    pub const LEVEL_TWO_SPEED: f32 = 6.0;

    /// Coin radius
    pub const GOAL_RADIUS: f32 = 10.0;

    /// Delay between falling out of the world and the automatic level restart
    pub const RESTART_DELAY_SECS: f64 = 1.2;
}
