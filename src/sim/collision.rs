//! Collision tests for the player box
//!
//! Landing uses a swept vertical-crossing test: the foot edge must start at or
//! above a platform top and the tentative foot edge must reach it. Any fall
//! speed lands. Lateral contact with platform sides is not resolved.

use glam::Vec2;

use super::state::{Goal, Platform, Player};

/// Result of a successful landing check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Index of the platform landed on
    pub platform: usize,
    /// Player top edge after snapping onto the platform
    pub y: f32,
}

/// Whether the player's horizontal extent strictly overlaps the platform's
#[inline]
pub fn horizontal_overlap(x: f32, platform: &Platform) -> bool {
    x + Player::WIDTH > platform.x && x < platform.right()
}

/// Find the first platform (in list order) the player lands on while moving
/// from `y` to `next_y`.
pub fn swept_landing(x: f32, y: f32, next_y: f32, platforms: &[Platform]) -> Option<Landing> {
    let foot = y + Player::HEIGHT;
    let next_foot = next_y + Player::HEIGHT;

    platforms
        .iter()
        .enumerate()
        .filter(|(_, plat)| horizontal_overlap(x, plat))
        .find(|(_, plat)| foot <= plat.y && next_foot >= plat.y)
        .map(|(platform, plat)| Landing {
            platform,
            y: plat.y - Player::HEIGHT,
        })
}

/// Whether the player's center is close enough to pick up the goal.
///
/// The player counts as a circle of radius `max(width, height) / 2`.
pub fn goal_touched(player_center: Vec2, goal: &Goal) -> bool {
    let reach = goal.radius + Player::WIDTH.max(Player::HEIGHT) / 2.0;
    player_center.distance(goal.pos) < reach
}
