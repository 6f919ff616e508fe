//! Demo player
//!
//! Plays the game through the public command surface so headless runs and
//! soak tests exercise the same paths a human would. All choices come from a
//! seeded PCG stream, so a seed always replays the same game.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{GRID_COLS, GRID_ROWS};
use crate::sim::{GameState, GridCell, TowerKind};

/// Towers are only worth building this close to the path (fraction of range)
const SITE_REACH: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Issue this frame's commands; returns how many were accepted
    pub fn act(&mut self, state: &mut GameState) -> u32 {
        if state.is_over() {
            return 0;
        }
        let mut accepted = 0;

        // Credits go to the weakest tower first
        while state.economy.upgrade_credits > 0 {
            let Some(cell) = state
                .towers
                .iter()
                .min_by_key(|t| (t.level, t.id))
                .map(|t| t.cell)
            else {
                break;
            };
            match state.upgrade_tower(cell) {
                Ok(_) => accepted += 1,
                Err(err) => {
                    log::debug!("Autopilot upgrade refused: {err}");
                    break;
                }
            }
        }

        while let Some(kind) = self.pick_affordable(state) {
            let sites = build_sites(state, kind);
            if sites.is_empty() {
                break;
            }
            let cell = sites[self.rng.random_range(0..sites.len())];
            log::debug!("Autopilot building {} at {}", kind.as_str(), cell);
            state.select_tower(kind);
            match state.interact(cell) {
                Ok(()) => accepted += 1,
                Err(err) => {
                    log::debug!("Autopilot build refused: {err}");
                    break;
                }
            }
        }

        if !state.waves.is_running() && state.waves.has_next_wave() {
            match state.start_next_wave() {
                Ok(()) => accepted += 1,
                Err(err) => log::debug!("Autopilot wave start refused: {err}"),
            }
        }
        accepted
    }

    fn pick_affordable(&mut self, state: &GameState) -> Option<TowerKind> {
        let affordable: Vec<TowerKind> = TowerKind::ALL
            .into_iter()
            .filter(|&kind| state.economy.can_afford(state.tuning.towers.get(kind).cost))
            .collect();
        if affordable.is_empty() {
            return None;
        }
        Some(affordable[self.rng.random_range(0..affordable.len())])
    }
}

/// Open cells, in row-major order, where `kind` would cover the path
pub fn build_sites(state: &GameState, kind: TowerKind) -> Vec<GridCell> {
    let reach = state.tuning.towers.get(kind).range * SITE_REACH;
    (0..GRID_ROWS)
        .flat_map(|row| (0..GRID_COLS).map(move |col| GridCell::new(col, row)))
        .filter(|&cell| state.check_placement(cell, kind).is_ok())
        .filter(|cell| state.path.is_near_segment(cell.center(), reach))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, SimulationClock, is_path_cell};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(Tuning::default()).unwrap()
    }

    #[test]
    fn test_first_move_builds_and_starts() {
        let mut state = state();
        let mut pilot = Autopilot::new(1);
        assert!(pilot.act(&mut state) >= 2);
        assert!(!state.towers.is_empty());
        assert!(state.waves.is_running());
        // Left with less than the cheapest tower
        assert!(state.economy.gold < 45);
        for tower in &state.towers {
            assert!(!is_path_cell(&state.tuning.path, tower.cell));
            assert!(tower.cell.in_bounds());
        }
    }

    #[test]
    fn test_same_seed_same_game() {
        let play = |seed| {
            let mut state = state();
            let mut pilot = Autopilot::new(seed);
            pilot.act(&mut state);
            state.towers.iter().map(|t| (t.kind, t.cell)).collect::<Vec<_>>()
        };
        assert_eq!(play(42), play(42));
    }

    #[test]
    fn test_spends_credits() {
        let mut state = state();
        let mut pilot = Autopilot::new(3);
        pilot.act(&mut state);
        state.economy.grant_credits(2);
        pilot.act(&mut state);
        assert_eq!(state.economy.upgrade_credits, 0);
        let levels: u32 = state.towers.iter().map(|t| t.level - 1).sum();
        assert_eq!(levels, 2);
    }

    #[test]
    fn test_build_sites_cover_path() {
        let state = state();
        let sites = build_sites(&state, TowerKind::Flame);
        assert!(!sites.is_empty());
        assert!(sites.iter().all(|c| !is_path_cell(&state.tuning.path, *c)));
    }

    #[test]
    fn test_plays_to_the_end() {
        let mut state = state();
        let mut pilot = Autopilot::new(12345);
        let mut clock = SimulationClock::default();
        let frame_dt = 1.0 / 60.0;

        for _ in 0..(60 * 1200) {
            pilot.act(&mut state);
            clock.advance(&mut state, frame_dt);
            if state.is_over() {
                break;
            }
        }
        assert_ne!(state.phase, GamePhase::Playing);
        assert!(state.waves.wave_number() >= 1);
    }
}
