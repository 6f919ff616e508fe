//! Wave schedule and spawn cadence
//!
//! The director walks a static wave table. Each wave spawns its quota one
//! enemy at a time, then drains until every enemy it spawned has been killed
//! or has breached.

use serde::{Deserialize, Serialize};

use crate::consts::{SPAWN_INTERVAL_BASE, SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_STEP};
use crate::error::CommandError;

/// Stats shared by every enemy of one wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveEntry {
    /// Number of enemies to spawn
    pub count: u32,
    pub health: f32,
    pub speed: f32,
    /// Gold per kill
    pub reward: u32,
    #[serde(default)]
    pub armor: f32,
    /// Boss waves only change messaging; mechanics are identical
    #[serde(default)]
    pub boss: bool,
}

/// Where the director is within the current wave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WaveState {
    /// No wave running (before the first, or between waves)
    Idle,
    /// Quota not yet exhausted
    Spawning,
    /// Quota spawned, waiting for the field to empty
    Draining,
}

/// Reported once when a running wave empties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveCompletion {
    /// More waves remain (zero-based index of the wave just cleared)
    Cleared { wave: usize },
    /// The final wave has been drained
    Final,
}

#[derive(Debug, Clone, Serialize)]
pub struct WaveDirector {
    table: Vec<WaveEntry>,
    current: Option<usize>,
    spawned: u32,
    spawn_timer: f32,
    state: WaveState,
}

impl WaveDirector {
    pub fn new(table: Vec<WaveEntry>) -> Self {
        Self {
            table,
            current: None,
            spawned: 0,
            spawn_timer: 0.0,
            state: WaveState::Idle,
        }
    }

    /// Return to before the first wave
    pub fn reset(&mut self) {
        self.current = None;
        self.spawned = 0;
        self.spawn_timer = 0.0;
        self.state = WaveState::Idle;
    }

    pub fn state(&self) -> WaveState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state != WaveState::Idle
    }

    pub fn total_waves(&self) -> usize {
        self.table.len()
    }

    /// Zero-based index of the current (or last started) wave
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// One-based wave number for display (0 before the first wave)
    pub fn wave_number(&self) -> usize {
        self.current.map_or(0, |i| i + 1)
    }

    pub fn current_entry(&self) -> Option<&WaveEntry> {
        self.current.and_then(|i| self.table.get(i))
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn has_next_wave(&self) -> bool {
        self.current.map_or(0, |i| i + 1) < self.table.len()
    }

    /// Seconds between spawns; shrinks each wave down to a floor
    pub fn spawn_interval(&self) -> f32 {
        let index = self.current.unwrap_or(0) as f32;
        (SPAWN_INTERVAL_BASE - index * SPAWN_INTERVAL_STEP).max(SPAWN_INTERVAL_MIN)
    }

    /// Begin the next wave in the table
    pub fn start_next_wave(&mut self) -> Result<&WaveEntry, CommandError> {
        if self.is_running() {
            return Err(CommandError::WaveInProgress);
        }
        if !self.has_next_wave() {
            return Err(CommandError::AllWavesComplete);
        }
        let index = self.current.map_or(0, |i| i + 1);
        self.current = Some(index);
        self.spawned = 0;
        self.spawn_timer = 0.0;
        self.state = WaveState::Spawning;
        log::info!(
            "Wave {}/{} started (spawn interval {:.2}s)",
            index + 1,
            self.table.len(),
            self.spawn_interval()
        );
        Ok(&self.table[index])
    }

    /// Advance the spawn timer; returns the entry to spawn from when one is due
    pub fn tick_spawn(&mut self, dt: f32) -> Option<WaveEntry> {
        if self.state != WaveState::Spawning {
            return None;
        }
        let entry = *self.current_entry()?;
        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval() && self.spawned < entry.count {
            self.spawn_timer = 0.0;
            self.spawned += 1;
            if self.spawned >= entry.count {
                self.state = WaveState::Draining;
            }
            return Some(entry);
        }
        if self.spawned >= entry.count {
            // Zero-count entries drain immediately
            self.state = WaveState::Draining;
        }
        None
    }

    /// Finish the wave once the quota is out and nothing is left alive
    pub fn poll_completion(&mut self, living_enemies: usize) -> Option<WaveCompletion> {
        if self.state != WaveState::Draining || living_enemies > 0 {
            return None;
        }
        self.state = WaveState::Idle;
        let wave = self.current?;
        if self.has_next_wave() {
            log::info!("Wave {} cleared", wave + 1);
            Some(WaveCompletion::Cleared { wave })
        } else {
            log::info!("Final wave {} drained", wave + 1);
            Some(WaveCompletion::Final)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(count: u32) -> WaveEntry {
        WaveEntry {
            count,
            health: 10.0,
            speed: 50.0,
            reward: 5,
            armor: 0.0,
            boss: false,
        }
    }

    #[test]
    fn test_start_wave_transitions() {
        let mut director = WaveDirector::new(vec![entry(2), entry(3)]);
        assert_eq!(director.state(), WaveState::Idle);
        assert_eq!(director.wave_number(), 0);

        assert_eq!(director.start_next_wave().unwrap().count, 2);
        assert_eq!(director.state(), WaveState::Spawning);
        assert_eq!(director.wave_number(), 1);

        // Cannot start while running
        assert_eq!(
            director.start_next_wave().unwrap_err(),
            CommandError::WaveInProgress
        );
    }

    #[test]
    fn test_spawn_cadence_and_draining() {
        let mut director = WaveDirector::new(vec![entry(2)]);
        director.start_next_wave().unwrap();
        assert_eq!(director.spawn_interval(), 1.0);

        assert!(director.tick_spawn(0.5).is_none());
        assert!(director.tick_spawn(0.5).is_some());
        assert_eq!(director.spawned(), 1);
        assert_eq!(director.state(), WaveState::Spawning);

        assert!(director.tick_spawn(0.99).is_none());
        assert!(director.tick_spawn(0.02).is_some());
        assert_eq!(director.state(), WaveState::Draining);

        // Quota exhausted
        assert!(director.tick_spawn(5.0).is_none());
        assert_eq!(director.spawned(), 2);
    }

    #[test]
    fn test_spawn_interval_floor() {
        let table = vec![entry(1); 20];
        let mut director = WaveDirector::new(table);
        director.start_next_wave().unwrap();
        assert!((director.spawn_interval() - 1.0).abs() < 1e-6);

        for _ in 0..15 {
            director.tick_spawn(1.0);
            director.poll_completion(0);
            director.start_next_wave().unwrap();
        }
        // Wave index 15 would give 0.25 without the floor
        assert_eq!(director.current_index(), Some(15));
        assert_eq!(director.spawn_interval(), SPAWN_INTERVAL_MIN);
    }

    #[test]
    fn test_completion_waits_for_living_enemies() {
        let mut director = WaveDirector::new(vec![entry(1), entry(1)]);
        director.start_next_wave().unwrap();
        assert!(director.poll_completion(0).is_none(), "still spawning");

        director.tick_spawn(1.0);
        assert!(director.poll_completion(1).is_none());
        assert_eq!(
            director.poll_completion(0),
            Some(WaveCompletion::Cleared { wave: 0 })
        );
        assert_eq!(director.state(), WaveState::Idle);
        // Reported once
        assert!(director.poll_completion(0).is_none());
    }

    #[test]
    fn test_final_wave_and_exhaustion() {
        let mut director = WaveDirector::new(vec![entry(1)]);
        director.start_next_wave().unwrap();
        director.tick_spawn(1.0);
        assert_eq!(director.poll_completion(0), Some(WaveCompletion::Final));
        assert!(!director.has_next_wave());
        assert_eq!(
            director.start_next_wave().unwrap_err(),
            CommandError::AllWavesComplete
        );
    }

    #[test]
    fn test_zero_count_wave_drains() {
        let mut director = WaveDirector::new(vec![entry(0), entry(1)]);
        director.start_next_wave().unwrap();
        assert!(director.tick_spawn(0.1).is_none());
        assert_eq!(director.state(), WaveState::Draining);
        assert_eq!(
            director.poll_completion(0),
            Some(WaveCompletion::Cleared { wave: 0 })
        );
    }

    #[test]
    fn test_reset() {
        let mut director = WaveDirector::new(vec![entry(1), entry(1)]);
        director.start_next_wave().unwrap();
        director.reset();
        assert_eq!(director.current_index(), None);
        assert!(!director.is_running());
        assert!(director.has_next_wave());
    }
}
