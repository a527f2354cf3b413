//! Logical directional input
//!
//! Tracks which of the four directions are held, independent of the physical
//! keys that produced them (see `platform::input` for the key mapping).

use serde::{Deserialize, Serialize};

/// A logical direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Held state of the four directions, read by every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl InputState {
    fn flag_mut(&mut self, dir: Direction) -> &mut bool {
        match dir {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }

    /// Whether a direction is currently held
    pub fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Mark a direction as held.
    ///
    /// Returns true only on a released -> pressed transition, so callers can
    /// treat the result as an edge.
    pub fn press(&mut self, dir: Direction) -> bool {
        let flag = self.flag_mut(dir);
        let edge = !*flag;
        *flag = true;
        edge
    }

    /// Mark a direction as released
    pub fn release(&mut self, dir: Direction) {
        *self.flag_mut(dir) = false;
    }

    /// Release everything (window blur, level reset)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
