//! Homing projectiles and hit resolution
//!
//! A projectile never owns its target; it holds an `EnemyId` and looks the
//! enemy up each step. A target that is gone or dead makes the projectile
//! stale, and stale projectiles are dropped without effect.

use glam::Vec2;
use serde::Serialize;

use super::enemy::{Enemy, EnemyId, Kill};
use super::path::PathModel;
use super::tower::{TowerEffect, TowerKind};
use crate::consts::PROJECTILE_HIT_RADIUS;

#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub id: u32,
    /// Firing tower's kind (for rendering)
    pub kind: TowerKind,
    pub pos: Vec2,
    pub target: EnemyId,
    pub speed: f32,
    pub damage: f32,
    pub effect: TowerEffect,
}

/// Result of one projectile step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    InFlight,
    /// Reached the target; resolve the hit and drop the projectile
    Arrived,
}

impl Projectile {
    /// Home on the target's current position without overshooting
    pub fn advance(&mut self, target_pos: Vec2, dt: f32) -> Flight {
        let to_target = target_pos - self.pos;
        let dist = to_target.length();
        if dist > PROJECTILE_HIT_RADIUS {
            let step = (self.speed * dt).min(dist);
            self.pos += to_target / dist * step;
        }
        if self.pos.distance(target_pos) <= PROJECTILE_HIT_RADIUS {
            Flight::Arrived
        } else {
            Flight::InFlight
        }
    }
}

/// Apply a projectile's damage and payload to `enemies[target]`
///
/// The slow lands only if the target survives. A chain arcs from the impact
/// point to the first other living enemy within its radius, for a single hop
/// of reduced damage and no slow. Returns every kill the hit caused.
pub fn resolve_hit(
    enemies: &mut [Enemy],
    target: usize,
    damage: f32,
    effect: TowerEffect,
    path: &PathModel,
) -> Vec<Kill> {
    let mut kills = Vec::new();
    let impact = enemies[target].position(path);
    let target_id = enemies[target].id;

    if let Some(kill) = enemies[target].take_damage(damage) {
        kills.push(kill);
    }

    match effect {
        TowerEffect::Direct => {}
        TowerEffect::Slow { factor, duration } => {
            if enemies[target].alive {
                enemies[target].apply_slow(factor, duration);
            }
        }
        TowerEffect::Chain { radius, falloff } => {
            let victim = enemies.iter_mut().find(|e| {
                e.alive && e.id != target_id && e.position(path).distance(impact) <= radius
            });
            if let Some(victim) = victim {
                log::trace!("Chain {:?} -> {:?}", target_id, victim.id);
                if let Some(kill) = victim.take_damage(damage * falloff) {
                    kills.push(kill);
                }
            }
        }
    }

    kills
}
