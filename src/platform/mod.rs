//! Platform glue
//!
//! Handles browser specifics the simulation must not see:
//! - Physical key codes -> logical input
//! - Optional cosmetic assets (background image)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod assets;

pub use input::{KeyAction, action_for_code};
