//! Level layouts
//!
//! `setup_level` is the only place that builds platforms or places the goal.

use glam::Vec2;

use super::state::{GameEvent, GameState, Goal, Level, Platform, Player, PlayerColor};
use crate::consts::*;

/// Goal inset from the right edge of the last platform
fn goal_inset(level: Level) -> f32 {
    match level {
        Level::One => 30.0,
        Level::Two => 40.0,
    }
}

/// Platform layout for a level, left to right
pub fn platforms_for(level: Level) -> Vec<Platform> {
    match level {
        Level::One => vec![
            Platform::new(0.0, GROUND_Y, 300.0),
            Platform::new(360.0, GROUND_Y, 120.0),
            Platform::new(520.0, GROUND_Y, 260.0),
        ],
        Level::Two => vec![
            Platform::new(0.0, GROUND_Y, 180.0),
            Platform::new(240.0, GROUND_Y, 100.0),
            Platform::new(360.0, GROUND_Y, 90.0),
            Platform::new(480.0, GROUND_Y, 100.0),
            Platform::new(620.0, GROUND_Y, 180.0),
        ],
    }
}

/// Rebuild the world for `level`: platforms, goal, player spawn and attributes.
///
/// Does not touch the phase or the pending restart; the transition methods
/// own those.
pub fn setup_level(state: &mut GameState, level: Level) {
    let platforms = platforms_for(level);

    // Coin sits on the last platform, inset from its right edge
    let goal_pos = platforms
        .last()
        .map(|p| Vec2::new(p.right() - goal_inset(level), p.y - GOAL_RADIUS))
        .unwrap_or(Vec2::new(WORLD_WIDTH / 2.0, GROUND_Y - GOAL_RADIUS));

    state.player = match level {
        Level::One => Player {
            pos: Vec2::new(200.0, 100.0),
            vy: 0.0,
            speed: LEVEL_ONE_SPEED,
            color: PlayerColor::Green,
            grounded: false,
        },
        Level::Two => {
            let spawn_y = platforms.first().map_or(GROUND_Y, |p| p.y) - Player::HEIGHT;
            Player {
                pos: Vec2::new(40.0, spawn_y),
                vy: 0.0,
                speed: LEVEL_TWO_SPEED,
                color: PlayerColor::Red,
                grounded: true,
            }
        }
    };

    state.level = level;
    state.platforms = platforms;
    state.goal = Goal::new(goal_pos);
    state.events.push(GameEvent::LevelStarted(level));

    log::info!(
        "Level {} loaded ({} platforms, goal at {:.0},{:.0})",
        level.number(),
        state.platforms.len(),
        goal_pos.x,
        goal_pos.y
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_layout() {
        let mut state = GameState::new();
        setup_level(&mut state, Level::One);

        assert_eq!(state.level, Level::One);
        assert_eq!(state.platforms.len(), 3);
        assert_eq!(state.platforms[2], Platform::new(520.0, 420.0, 260.0));
        assert_eq!(state.goal.pos, Vec2::new(750.0, 410.0));
        assert!(!state.goal.collected);
        assert_eq!(state.player.pos, Vec2::new(200.0, 100.0));
        assert_eq!(state.player.speed, 3.0);
        assert_eq!(state.player.color, PlayerColor::Green);
        assert!(!state.player.grounded);
    }

    #[test]
    fn test_level_two_layout() {
        let mut state = GameState::new();
        setup_level(&mut state, Level::Two);

        assert_eq!(state.level, Level::Two);
        assert_eq!(state.platforms.len(), 5);
        assert_eq!(state.goal.pos, Vec2::new(760.0, 410.0));
        assert_eq!(state.player.pos, Vec2::new(40.0, 400.0));
        assert_eq!(state.player.speed, 6.0);
        assert_eq!(state.player.color, PlayerColor::Red);
        assert!(state.player.grounded);
    }

    #[test]
    fn test_setup_replaces_goal_and_platforms() {
        let mut state = GameState::new();
        state.goal.collected = true;
        state.platforms.push(Platform::new(0.0, 0.0, 10.0));
        state.player.vy = 7.0;

        setup_level(&mut state, Level::One);
        assert!(!state.goal.collected);
        assert_eq!(state.platforms, platforms_for(Level::One));
        assert_eq!(state.player.vy, 0.0);
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::LevelStarted(Level::One))
        );
    }

    #[test]
    fn test_levels_stay_inside_world() {
        for level in [Level::One, Level::Two] {
            for plat in platforms_for(level) {
                assert!(plat.x >= 0.0 && plat.right() <= WORLD_WIDTH);
                assert!(plat.y < WORLD_HEIGHT);
            }
        }
    }
}
