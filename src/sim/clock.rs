//! Frame-to-step conversion
//!
//! The simulation moves in fixed per-step increments. `StepClock` decides how
//! many steps a rendered frame gets.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SIM_HZ};

/// How frames map to simulation steps
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum StepMode {
    /// Exactly one step per frame; game speed follows the display refresh rate
    #[default]
    PerFrame,
    /// Fixed-rate steps driven by real elapsed time
    Fixed { hz: f32 },
}

impl StepMode {
    pub fn fixed_60() -> Self {
        StepMode::Fixed { hz: SIM_HZ }
    }
}

/// Accumulates frame time and hands out step counts
#[derive(Debug, Clone, Default)]
pub struct StepClock {
    mode: StepMode,
    accumulator: f32,
}

impl StepClock {
    pub fn new(mode: StepMode) -> Self {
        Self {
            mode,
            accumulator: 0.0,
        }
    }

    pub fn mode(&self) -> StepMode {
        self.mode
    }

    /// Switch modes, dropping any banked time
    pub fn set_mode(&mut self, mode: StepMode) {
        self.mode = mode;
        self.accumulator = 0.0;
    }

    /// Forget banked time (after a reset or a long pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Number of steps to run for a frame that took `dt` seconds
    pub fn steps_for(&mut self, dt: f32) -> u32 {
        match self.mode {
            StepMode::PerFrame => 1,
            StepMode::Fixed { hz } => {
                let step = 1.0 / hz.max(1.0);
                self.accumulator += dt.clamp(0.0, 0.1);

                let mut steps = 0;
                while self.accumulator >= step && steps < MAX_SUBSTEPS {
                    self.accumulator -= step;
                    steps += 1;
                }
                // Anything beyond the cap is dropped rather than carried
                if steps == MAX_SUBSTEPS {
                    self.accumulator = self.accumulator.min(step);
                }
                steps
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_frame_is_one_step() {
        let mut clock = StepClock::new(StepMode::PerFrame);
        assert_eq!(clock.steps_for(0.0), 1);
        assert_eq!(clock.steps_for(0.5), 1);
        assert_eq!(clock.steps_for(1.0 / 144.0), 1);
    }

    #[test]
    fn test_fixed_accumulates() {
        let mut clock = StepClock::new(StepMode::Fixed { hz: 100.0 });
        // 5ms is half a step
        assert_eq!(clock.steps_for(0.005), 0);
        assert_eq!(clock.steps_for(0.006), 1);
        assert_eq!(clock.steps_for(0.025), 2);
    }

    #[test]
    fn test_fixed_caps_substeps() {
        let mut clock = StepClock::new(StepMode::Fixed { hz: 1000.0 });
        // 0.1s clamp = 100 steps worth, capped
        assert_eq!(clock.steps_for(5.0), MAX_SUBSTEPS);
        // Backlog was dropped
        assert!(clock.steps_for(0.0) <= 1);
    }

    #[test]
    fn test_set_mode_clears_backlog() {
        let mut clock = StepClock::new(StepMode::Fixed { hz: 10.0 });
        assert_eq!(clock.steps_for(0.09), 0);
        clock.set_mode(StepMode::fixed_60());
        assert_eq!(clock.mode(), StepMode::Fixed { hz: 60.0 });
        assert_eq!(clock.steps_for(0.0), 0);
    }
}
