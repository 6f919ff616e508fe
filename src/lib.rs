//! TD Academy - A path-following tower-defense simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, targeting, projectiles, waves, economy)
//! - `tuning`: Data-driven game balance (tower catalog, wave table, path)
//! - `settings`: Host-side runtime configuration
//! - `autopilot`: Seeded demo player for headless runs

pub mod autopilot;
pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{CommandError, ConfigError, PathError};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Board geometry (900 x 540 playfield)
    pub const CELL_SIZE: f32 = 45.0;
    pub const GRID_COLS: i32 = 20;
    pub const GRID_ROWS: i32 = 12;

    /// Baseline tower range (3.1 cells)
    pub const BASE_TOWER_RANGE: f32 = CELL_SIZE * 3.1;

    /// Starting economy
    pub const STARTING_GOLD: u32 = 120;
    pub const STARTING_LIVES: u32 = 20;

    /// Projectile resolves its hit within this distance of the target
    pub const PROJECTILE_HIT_RADIUS: f32 = 6.0;

    /// Spawn cadence: interval = max(MIN, BASE - STEP * wave_index)
    pub const SPAWN_INTERVAL_BASE: f32 = 1.0;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.05;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.45;

    /// Upgrade credits
    pub const WAVE_CLEAR_CREDITS: u32 = 1;
    pub const BOSS_KILL_CREDITS: u32 = 2;
    pub const UPGRADE_CREDIT_COST: u32 = 1;

    /// Per-level upgrade increments
    pub const UPGRADE_DAMAGE_FRACTION: f32 = 0.15;
    pub const UPGRADE_RANGE_FRACTION: f32 = 0.06;
    pub const UPGRADE_FIRE_RATE_STEP: f32 = 0.07;

    /// Game speed multiplier ceiling
    pub const MAX_GAME_SPEED: f32 = 4.0;
}

/// Linear interpolation between two points
#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Shortest distance from `point` to the segment `a`-`b`
#[inline]
pub fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 20.0);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 0.5), Vec2::new(5.0, 10.0));
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 0.0);
        // Perpendicular foot inside the segment
        assert!((distance_to_segment(Vec2::new(50.0, 7.0), a, b) - 7.0).abs() < 1e-4);
        // Beyond the end clamps to the endpoint
        assert!((distance_to_segment(Vec2::new(103.0, 4.0), a, b) - 5.0).abs() < 1e-4);
        // Degenerate segment
        assert!((distance_to_segment(Vec2::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-4);
    }
}
