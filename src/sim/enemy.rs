//! Enemies: path-following movement, armor, slow status
//!
//! An enemy is Traveling until it is either Killed (health reaches zero) or
//! Breached (reaches the final waypoint). Both transitions happen at most
//! once and are reported to the caller, which turns them into economy events.

use glam::Vec2;
use serde::Serialize;

use super::path::PathModel;
use super::wave::WaveEntry;

/// Stable enemy handle
///
/// Ids are allocated monotonically and never reused, so a projectile holding
/// an id can always tell whether its target is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EnemyId(pub u32);

/// Reward owed for a kill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub id: EnemyId,
    pub reward: u32,
    pub boss: bool,
}

/// A mobile enemy
#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub max_health: f32,
    pub health: f32,
    /// Fraction of incoming damage absorbed (0..1)
    pub armor: f32,
    /// Path units per second
    pub base_speed: f32,
    /// Transient multiplier from slow effects (1 = unslowed)
    pub speed_factor: f32,
    /// Seconds of slow remaining
    pub slow_timer: f32,
    pub segment: usize,
    /// Fraction of the current segment covered (0..1)
    pub progress: f32,
    pub reward: u32,
    pub is_boss: bool,
    pub alive: bool,
    /// Spawned during the current step; skips movement until the next one
    #[serde(skip)]
    pub fresh: bool,
}

impl Enemy {
    /// Create an enemy at the path start with stats from a wave entry
    pub fn spawn(id: EnemyId, entry: &WaveEntry) -> Self {
        Self {
            id,
            max_health: entry.health,
            health: entry.health,
            armor: entry.armor.clamp(0.0, 1.0),
            base_speed: entry.speed,
            speed_factor: 1.0,
            slow_timer: 0.0,
            segment: 0,
            progress: 0.0,
            reward: entry.reward,
            is_boss: entry.boss,
            alive: true,
            fresh: true,
        }
    }

    /// Current world position
    #[inline]
    pub fn position(&self, path: &PathModel) -> Vec2 {
        path.position_at(self.segment, self.progress)
    }

    /// Monotone distance-along-path proxy used for targeting
    #[inline]
    pub fn path_progress(&self) -> f32 {
        self.segment as f32 + self.progress
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn is_slowed(&self) -> bool {
        self.slow_timer > 0.0
    }

    /// Move along the path for `dt` seconds
    ///
    /// Travel carries across as many segments as the step covers. Returns true
    /// on the step the enemy reaches the final waypoint; the enemy is then no
    /// longer alive and later calls do nothing.
    pub fn advance(&mut self, path: &PathModel, dt: f32) -> bool {
        if !self.alive {
            return false;
        }

        let segments = path.segment_count();
        let mut remaining = (dt * self.speed_factor * self.base_speed).max(0.0);
        while remaining > 0.0 && self.segment < segments {
            let length = path.segment_length(self.segment);
            let segment_remaining = length * (1.0 - self.progress);
            if remaining < segment_remaining {
                self.progress = (self.progress + remaining / length).min(1.0);
                remaining = 0.0;
            } else {
                remaining -= segment_remaining;
                self.segment += 1;
                self.progress = 0.0;
            }
        }

        if self.slow_timer > 0.0 {
            self.slow_timer -= dt;
            if self.slow_timer <= 0.0 {
                self.slow_timer = 0.0;
                self.speed_factor = 1.0;
            }
        }

        if self.segment >= segments {
            self.segment = segments;
            self.progress = 0.0;
            self.alive = false;
            return true;
        }
        false
    }

    /// Apply armor-mitigated damage
    ///
    /// Returns the kill on the hit that drops health to zero. Damage to an
    /// enemy that is already dead or breached is ignored.
    pub fn take_damage(&mut self, amount: f32) -> Option<Kill> {
        if !self.alive {
            return None;
        }
        let mitigated = amount * (1.0 - self.armor);
        self.health = (self.health - mitigated).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
            return Some(Kill {
                id: self.id,
                reward: self.reward,
                boss: self.is_boss,
            });
        }
        None
    }

    /// Merge a slow: the strongest factor and the longest duration win
    pub fn apply_slow(&mut self, factor: f32, duration: f32) {
        self.speed_factor = self.speed_factor.min(factor.max(0.0));
        self.slow_timer = self.slow_timer.max(duration);
    }
}
