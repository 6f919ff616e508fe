//! Frame-to-step accumulator
//!
//! Hosts deliver frames of arbitrary length; the simulation only ever sees
//! fixed steps. Leftover time carries to the next frame, and a long stall is
//! clamped so it cannot trigger a burst of catch-up steps.

use super::state::GameState;
use super::tick::tick;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct SimulationClock {
    fixed_dt: f32,
    max_substeps: u32,
    max_frame_dt: f32,
    accumulator: f32,
}

impl SimulationClock {
    pub fn new(settings: &Settings) -> Self {
        Self {
            fixed_dt: settings.fixed_dt(),
            max_substeps: settings.max_substeps.max(1),
            max_frame_dt: settings.max_frame_dt,
            accumulator: 0.0,
        }
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Unconsumed time carried into the next frame
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Feed one frame of wall time; returns the number of steps run
    pub fn advance(&mut self, state: &mut GameState, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.max_frame_dt)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= self.fixed_dt && substeps < self.max_substeps {
            tick(state, self.fixed_dt);
            self.accumulator -= self.fixed_dt;
            substeps += 1;
        }
        if substeps == self.max_substeps && self.accumulator >= self.fixed_dt {
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator %= self.fixed_dt;
        }
        substeps
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_SUBSTEPS, SIM_DT};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(Tuning::default()).unwrap()
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut state = state();
        let mut clock = SimulationClock::default();

        assert_eq!(clock.advance(&mut state, SIM_DT * 0.6), 0);
        assert_eq!(clock.advance(&mut state, SIM_DT * 0.6), 1);
        assert!((clock.pending() - SIM_DT * 0.2).abs() < 1e-6);
        assert!((state.time - SIM_DT).abs() < 1e-6);
    }

    #[test]
    fn test_substep_cap() {
        let mut state = state();
        let mut clock = SimulationClock::default();
        // A 0.1s frame would need 12 steps
        assert_eq!(clock.advance(&mut state, 0.1), MAX_SUBSTEPS);
        assert!(clock.pending() < SIM_DT);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut state = state();
        let mut clock = SimulationClock::default();
        clock.advance(&mut state, 5.0);
        assert!(state.time <= 0.1 + 1e-4);
    }

    #[test]
    fn test_bad_frame_time_is_ignored() {
        let mut state = state();
        let mut clock = SimulationClock::default();
        assert_eq!(clock.advance(&mut state, f32::NAN), 0);
        assert_eq!(clock.advance(&mut state, -1.0), 0);
        assert_eq!(clock.pending(), 0.0);
    }
}
