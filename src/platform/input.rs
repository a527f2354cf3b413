//! Keyboard mapping
//!
//! Arrow keys and WASD drive the same logical directions. Codes are
//! `KeyboardEvent.code` values, so the mapping follows key position rather
//! than keyboard layout.

use crate::sim::Direction;

/// What a physical key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    /// Rebuild the current level
    RestartLevel,
}

/// Map a `KeyboardEvent.code` to a game action
pub fn action_for_code(code: &str) -> Option<KeyAction> {
    let dir = match code {
        "ArrowLeft" | "KeyA" => Direction::Left,
        "ArrowRight" | "KeyD" => Direction::Right,
        "ArrowUp" | "KeyW" => Direction::Up,
        "ArrowDown" | "KeyS" => Direction::Down,
        "KeyR" => return Some(KeyAction::RestartLevel),
        _ => return None,
    };
    Some(KeyAction::Move(dir))
}
