//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives in `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::setup_level;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (the only phase where physics runs)
    Playing,
    /// Fell out of the world, waiting for the automatic restart
    Lost,
    /// Last coin collected, waiting for an explicit reset
    Finished,
}

/// Which of the two levels is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    One,
    Two,
}

impl Level {
    /// 1-based level number for display
    pub fn number(self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
        }
    }

    /// The level that follows this one, if any
    pub fn next(self) -> Option<Level> {
        match self {
            Level::One => Some(Level::Two),
            Level::Two => None,
        }
    }
}

/// Player tint. Cosmetic only: signals progression, never read by gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    Green,
    Red,
}

/// The player's box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    /// Horizontal distance per tick
    pub speed: f32,
    pub color: PlayerColor,
    /// Resting on a platform top
    pub grounded: bool,
}

impl Player {
    pub const WIDTH: f32 = PLAYER_WIDTH;
    pub const HEIGHT: f32 = PLAYER_HEIGHT;

    /// Y coordinate of the bottom edge
    #[inline]
    pub fn foot(&self) -> f32 {
        self.pos.y + Self::HEIGHT
    }

    /// Center of the box
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(Self::WIDTH / 2.0, Self::HEIGHT / 2.0)
    }

    /// Keep the box inside the horizontal world bounds
    pub fn clamp_to_world(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, WORLD_WIDTH - Self::WIDTH);
    }
}

/// A static platform. Its height runs to the bottom of the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl Platform {
    pub const fn new(x: f32, y: f32, width: f32) -> Self {
        Self { x, y, width }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// The level's coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
}

impl Goal {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: GOAL_RADIUS,
            collected: false,
        }
    }
}

/// A scheduled automatic restart after a fall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingRestart {
    pub level: Level,
    /// Wall-clock time (seconds) at which the restart fires
    pub deadline: f64,
}

/// Notifications for the shell (audio, logging, HUD). Never read by the sim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted(Level),
    Jumped,
    GoalCollected(Level),
    LevelAdvanced(Level),
    Fell(Level),
    Finished,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub level: Level,
    pub player: Player,
    /// Replaced wholesale by `setup_level`
    pub platforms: Vec<Platform>,
    /// Replaced wholesale by `setup_level`
    pub goal: Goal,
    /// At most one restart can be pending; any transition into Playing clears it
    pub pending_restart: Option<PendingRestart>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on level one
    pub fn new() -> Self {
        let mut state = Self {
            phase: GamePhase::Playing,
            level: Level::One,
            player: Player {
                pos: Vec2::ZERO,
                vy: 0.0,
                speed: LEVEL_ONE_SPEED,
                color: PlayerColor::Green,
                grounded: false,
            },
            platforms: Vec::new(),
            goal: Goal::new(Vec2::ZERO),
            pending_restart: None,
            time_ticks: 0,
            events: Vec::new(),
        };
        setup_level(&mut state, Level::One);
        state
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
