//! Simulation tick and game phase transitions
//!
//! One call to `tick` is one fixed simulation step. Wall-clock time only
//! matters for the pending restart deadline.

use glam::Vec2;

use super::collision::{goal_touched, swept_landing};
use super::input::{Direction, InputState};
use super::level::setup_level;
use super::state::{GameEvent, GamePhase, GameState, Level, PendingRestart, PlayerColor};
use crate::consts::*;

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &InputState, now: f64) {
    // A due restart consumes the whole step
    if let Some(pending) = state.pending_restart
        && now >= pending.deadline
    {
        log::info!("Restarting level {} after fall", pending.level.number());
        state.level = pending.level;
        state.restart_level();
        return;
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    let player = &mut state.player;

    // Horizontal movement; left and right cancel out
    if input.left {
        player.pos.x -= player.speed;
    }
    if input.right {
        player.pos.x += player.speed;
    }

    // Free vertical thrust while airborne
    if !player.grounded {
        if input.up {
            player.vy -= AIR_LIFT;
        }
        if input.down {
            player.vy += AIR_DIVE;
        }
    }

    // Gravity always applies; landing cancels it
    player.vy += GRAVITY;
    let next_y = player.pos.y + player.vy;

    match swept_landing(player.pos.x, player.pos.y, next_y, &state.platforms) {
        Some(landing) => {
            player.pos.y = landing.y;
            player.vy = 0.0;
            player.grounded = true;
        }
        None => {
            player.pos.y = next_y;
            player.grounded = false;
        }
    }

    let fell = player.pos.y > WORLD_HEIGHT + FALL_MARGIN;
    player.clamp_to_world();

    if fell {
        state.lose(now);
        return;
    }

    if !state.goal.collected && goal_touched(state.player.center(), &state.goal) {
        state.goal.collected = true;
        state.events.push(GameEvent::GoalCollected(state.level));
        match state.level.next() {
            Some(next) => state.advance_level(next),
            None => state.finish(),
        }
    }
}

impl GameState {
    /// Handle a direction key going down. An `Up` press edge while grounded
    /// and playing is a jump.
    pub fn key_down(&mut self, input: &mut InputState, dir: Direction) {
        let edge = input.press(dir);
        if edge && dir == Direction::Up {
            self.try_jump();
        }
    }

    /// Handle a direction key going up
    pub fn key_up(&mut self, input: &mut InputState, dir: Direction) {
        input.release(dir);
    }

    /// Apply the jump impulse if standing on a platform.
    ///
    /// Returns true if the jump happened.
    pub fn try_jump(&mut self) -> bool {
        if self.phase != GamePhase::Playing || !self.player.grounded {
            return false;
        }
        self.player.vy = JUMP_IMPULSE;
        self.player.grounded = false;
        self.events.push(GameEvent::Jumped);
        log::debug!("Jump at x={:.1}", self.player.pos.x);
        true
    }

    /// Playing -> Lost, scheduling a restart of the current level
    pub fn lose(&mut self, now: f64) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Lost;
        self.pending_restart = Some(PendingRestart {
            level: self.level,
            deadline: now + RESTART_DELAY_SECS,
        });
        self.events.push(GameEvent::Fell(self.level));
        log::info!(
            "Fell out of level {}, restarting in {:.1}s",
            self.level.number(),
            RESTART_DELAY_SECS
        );
    }

    /// Move on to `next` after collecting the goal.
    ///
    /// Speed and color are set here as part of the transition, before the
    /// level loader rebuilds the world.
    pub fn advance_level(&mut self, next: Level) {
        self.player.color = PlayerColor::Red;
        self.player.speed = LEVEL_TWO_SPEED;
        self.goal.pos = Vec2::new(-100.0, -100.0);
        setup_level(self, next);
        self.events.push(GameEvent::LevelAdvanced(next));
        log::info!("Advanced to level {}", next.number());
    }

    /// Playing -> Finished after the last goal
    pub fn finish(&mut self) {
        self.phase = GamePhase::Finished;
        self.events.push(GameEvent::Finished);
        log::info!("Game finished");
    }

    /// Rebuild the current level and resume play (from any phase)
    pub fn restart_level(&mut self) {
        let level = self.level;
        self.enter_playing(level);
    }

    /// Start over from level one (from any phase)
    pub fn reset_game(&mut self) {
        log::info!("Game reset");
        self.enter_playing(Level::One);
    }

    /// The single way back into Playing. Cancels any pending restart so a
    /// stale deadline can never override newer state.
    fn enter_playing(&mut self, level: Level) {
        self.pending_restart = None;
        setup_level(self, level);
        self.phase = GamePhase::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Platform;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    /// Step until grounded (or give up)
    fn settle(state: &mut GameState) {
        let input = InputState::default();
        for _ in 0..200 {
            tick(state, &input, 0.0);
            if state.player.grounded {
                return;
            }
        }
        panic!("player never landed");
    }

    #[test]
    fn test_scenario_a_spawn_falls_and_lands() {
        let mut state = GameState::new();
        assert_eq!(state.player.pos, Vec2::new(200.0, 100.0));

        settle(&mut state);
        assert_eq!(state.player.pos.y, 400.0);
        assert_eq!(state.player.vy, 0.0);
        assert_eq!(state.player.pos.x, 200.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_grounded_steady_state() {
        let mut state = GameState::new();
        settle(&mut state);

        let input = InputState::default();
        for _ in 0..50 {
            tick(&mut state, &input, 0.0);
            assert_eq!(state.player.pos.y, 400.0);
            assert_eq!(state.player.vy, 0.0);
            assert!(state.player.grounded);
        }
    }

    #[test]
    fn test_jump_impulse() {
        let mut state = GameState::new();
        settle(&mut state);
        state.drain_events();

        let mut input = InputState::default();
        state.key_down(&mut input, Direction::Up);
        assert!(!state.player.grounded);
        assert_eq!(state.player.vy, JUMP_IMPULSE);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);

        state.key_up(&mut input, Direction::Up);
        tick(&mut state, &input, 0.0);
        assert!((state.player.vy - (JUMP_IMPULSE + GRAVITY)).abs() < EPS);
        assert!(state.player.pos.y < 400.0);
        assert!(!state.player.grounded);
    }

    #[test]
    fn test_held_up_adds_lift_after_jump() {
        let mut state = GameState::new();
        settle(&mut state);

        let mut input = InputState::default();
        state.key_down(&mut input, Direction::Up);
        tick(&mut state, &input, 0.0);
        assert!((state.player.vy - (JUMP_IMPULSE - AIR_LIFT + GRAVITY)).abs() < EPS);
    }

    #[test]
    fn test_no_jump_while_airborne_or_repeated() {
        let mut state = GameState::new();
        let mut input = InputState::default();

        // Spawned in the air
        state.key_down(&mut input, Direction::Up);
        assert_eq!(state.player.vy, 0.0);
        assert!(state.events.iter().all(|e| *e != GameEvent::Jumped));

        // Land with Up still held: the held key is not a new edge
        state.key_up(&mut input, Direction::Up);
        settle(&mut state);
        input.press(Direction::Up);
        state.key_down(&mut input, Direction::Up);
        assert!(state.player.grounded);
    }

    #[test]
    fn test_dive_only_while_airborne() {
        let mut state = GameState::new();
        let input = InputState {
            down: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert!((state.player.vy - (AIR_DIVE + GRAVITY)).abs() < EPS);

        settle(&mut state);
        tick(&mut state, &input, 0.0);
        assert_eq!(state.player.vy, 0.0);
        assert!(state.player.grounded);
    }

    #[test]
    fn test_left_and_right_cancel() {
        let mut state = GameState::new();
        settle(&mut state);
        let input = InputState {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert_eq!(state.player.pos.x, 200.0);
    }

    #[test]
    fn test_clamp_at_left_wall() {
        let mut state = GameState::new();
        state.player.pos = Vec2::new(1.0, 400.0);
        state.player.grounded = true;
        let input = InputState {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert_eq!(state.player.pos.x, 0.0);
    }

    #[test]
    fn test_scenario_b_goal_advances_level() {
        let mut state = GameState::new();
        // Player center exactly on the coin
        state.player.pos = Vec2::new(740.0, 400.0);
        state.player.grounded = true;
        state.drain_events();

        tick(&mut state, &InputState::default(), 0.0);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GoalCollected(Level::One)));
        assert!(events.contains(&GameEvent::LevelAdvanced(Level::Two)));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, Level::Two);
        assert_eq!(state.platforms.len(), 5);
        assert_eq!(state.goal.pos, Vec2::new(760.0, 410.0));
        assert!(!state.goal.collected);
        assert_eq!(state.player.pos, Vec2::new(40.0, 400.0));
        assert_eq!(state.player.speed, 6.0);
        assert_eq!(state.player.color, PlayerColor::Red);
    }

    #[test]
    fn test_goal_on_last_level_finishes() {
        let mut state = GameState::new();
        setup_level(&mut state, Level::Two);
        state.player.pos = Vec2::new(750.0, 400.0);
        state.drain_events();

        tick(&mut state, &InputState::default(), 0.0);
        assert_eq!(state.phase, GamePhase::Finished);
        assert!(state.goal.collected);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GoalCollected(Level::Two), GameEvent::Finished]
        );

        // Finished is inert
        let before = state.player.clone();
        tick(&mut state, &InputState::default(), 100.0);
        assert_eq!(state.player, before);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_collected_goal_never_retriggers() {
        let mut state = GameState::new();
        state.player.pos = Vec2::new(740.0, 400.0);
        state.player.grounded = true;
        state.goal.collected = true;
        state.drain_events();

        for _ in 0..10 {
            tick(&mut state, &InputState::default(), 0.0);
        }
        assert_eq!(state.level, Level::One);
        assert!(state.goal.collected);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_scenario_c_fall_then_auto_restart() {
        let mut state = GameState::new();
        // Already below the fall line, above the gap between platforms
        state.player.pos = Vec2::new(320.0, WORLD_HEIGHT + FALL_MARGIN + 1.0);
        state.player.grounded = false;

        tick(&mut state, &InputState::default(), 10.0);
        assert_eq!(state.phase, GamePhase::Lost);
        let pending = state.pending_restart.expect("restart scheduled");
        assert_eq!(pending.level, Level::One);
        assert!((pending.deadline - (10.0 + RESTART_DELAY_SECS)).abs() < 1e-9);

        // Nothing moves while lost
        let frozen = state.player.clone();
        tick(&mut state, &InputState::default(), 11.0);
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.player, frozen);

        tick(&mut state, &InputState::default(), 10.0 + RESTART_DELAY_SECS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, Level::One);
        assert!(state.pending_restart.is_none());
        assert_eq!(state.player.pos, Vec2::new(200.0, 100.0));
        assert_eq!(state.platforms.len(), 3);
    }

    #[test]
    fn test_fall_restarts_same_level() {
        let mut state = GameState::new();
        setup_level(&mut state, Level::Two);
        state.player.pos = Vec2::new(200.0, 600.0);
        state.player.grounded = false;

        tick(&mut state, &InputState::default(), 0.0);
        assert_eq!(state.phase, GamePhase::Lost);
        tick(&mut state, &InputState::default(), 5.0);
        assert_eq!(state.level, Level::Two);
        assert_eq!(state.player.pos, Vec2::new(40.0, 400.0));
        assert!(state.player.grounded);
    }

    #[test]
    fn test_scenario_d_reset_from_finished() {
        let mut state = GameState::new();
        setup_level(&mut state, Level::Two);
        state.finish();

        state.reset_game();
        let fresh = GameState::new();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, Level::One);
        assert_eq!(state.platforms, fresh.platforms);
        assert_eq!(state.goal, fresh.goal);
        assert_eq!(state.player, fresh.player);
    }

    #[test]
    fn test_reset_cancels_pending_restart() {
        let mut state = GameState::new();
        setup_level(&mut state, Level::Two);
        state.lose(0.0);
        assert!(state.pending_restart.is_some());

        state.reset_game();
        assert!(state.pending_restart.is_none());

        // Walk a few ticks past the old deadline: level one keeps running
        for step in 0..5 {
            tick(&mut state, &InputState::default(), 2.0 + step as f64);
        }
        assert_eq!(state.level, Level::One);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_restart_level_from_any_phase() {
        let mut state = GameState::new();
        setup_level(&mut state, Level::Two);
        state.player.pos.x = 500.0;

        state.restart_level();
        assert_eq!(state.player.pos, Vec2::new(40.0, 400.0));

        state.lose(0.0);
        state.restart_level();
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.pending_restart.is_none());
    }

    #[test]
    fn test_no_jump_while_lost() {
        let mut state = GameState::new();
        settle(&mut state);
        state.lose(0.0);
        assert!(!state.try_jump());
        assert!(state.player.grounded);
    }

    #[test]
    fn test_empty_level_falls_into_lost() {
        let mut state = GameState::new();
        state.platforms.clear();
        for _ in 0..200 {
            tick(&mut state, &InputState::default(), 0.0);
        }
        assert_eq!(state.phase, GamePhase::Lost);
    }

    proptest! {
        #[test]
        fn x_stays_in_world(
            start_x in -50.0f32..850.0,
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..120)
        ) {
            let mut state = GameState::new();
            state.player.pos.x = start_x;
            for (left, right, up, down) in moves {
                let input = InputState { left, right, up, down };
                tick(&mut state, &input, 0.0);
                if state.phase == GamePhase::Playing {
                    prop_assert!(state.player.pos.x >= 0.0);
                    prop_assert!(state.player.pos.x <= WORLD_WIDTH - PLAYER_WIDTH);
                }
            }
        }

        #[test]
        fn swept_landing_is_exact(
            x in 0.0f32..280.0,
            gap in 0.0f32..300.0,
            vy in 0.0f32..500.0
        ) {
            let mut state = GameState::new();
            state.platforms = vec![Platform::new(0.0, 420.0, 300.0)];
            state.player.pos = Vec2::new(x, 400.0 - gap);
            state.player.vy = vy;
            state.player.grounded = false;

            // Only cases whose tentative foot reaches the top
            let next_foot = state.player.foot() + vy + GRAVITY;
            prop_assume!(next_foot >= 420.5);

            tick(&mut state, &InputState::default(), 0.0);
            prop_assert_eq!(state.player.pos.y, 400.0);
            prop_assert_eq!(state.player.vy, 0.0);
            prop_assert!(state.player.grounded);
        }
    }
}
