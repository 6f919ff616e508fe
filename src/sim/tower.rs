//! Towers: cooldown, target acquisition, upgrades

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::economy::Economy;
use super::enemy::{Enemy, EnemyId};
use super::grid::GridCell;
use super::path::PathModel;
use super::projectile::Projectile;
use crate::consts::{
    UPGRADE_CREDIT_COST, UPGRADE_DAMAGE_FRACTION, UPGRADE_FIRE_RATE_STEP, UPGRADE_RANGE_FRACTION,
};
use crate::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TowerId(pub u32);

/// Tower families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    /// Plain damage, fast fire
    #[default]
    Flame,
    /// Slows what it hits
    Frost,
    /// Arcs to one nearby enemy on impact
    Tesla,
}

impl TowerKind {
    pub const ALL: [TowerKind; 3] = [TowerKind::Flame, TowerKind::Frost, TowerKind::Tesla];

    pub fn as_str(&self) -> &'static str {
        match self {
            TowerKind::Flame => "flame",
            TowerKind::Frost => "frost",
            TowerKind::Tesla => "tesla",
        }
    }
}

/// Secondary effect carried by a tower's projectiles
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TowerEffect {
    /// Damage only
    #[default]
    Direct,
    /// Multiply target speed by `factor` for `duration` seconds
    Slow { factor: f32, duration: f32 },
    /// Hit one other enemy within `radius` for `damage * falloff`
    Chain { radius: f32, falloff: f32 },
}

/// Base stats for one tower kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerSpec {
    pub name: String,
    /// Gold cost to place
    pub cost: u32,
    pub range: f32,
    /// Shots per second
    pub fire_rate: f32,
    pub damage: f32,
    pub projectile_speed: f32,
    #[serde(default)]
    pub effect: TowerEffect,
}

/// A placed tower
#[derive(Debug, Clone, Serialize)]
pub struct Tower {
    pub id: TowerId,
    pub kind: TowerKind,
    pub name: String,
    pub cell: GridCell,
    pub pos: Vec2,
    pub base_range: f32,
    pub range_bonus: f32,
    pub base_fire_rate: f32,
    pub fire_rate_bonus: f32,
    pub base_damage: f32,
    pub damage_bonus: f32,
    pub projectile_speed: f32,
    pub effect: TowerEffect,
    /// Seconds until the next shot; may sit below zero while idle
    pub cooldown: f32,
    pub level: u32,
    /// Credits per upgrade
    pub upgrade_cost: u32,
}

impl Tower {
    pub fn new(id: TowerId, kind: TowerKind, cell: GridCell, spec: &TowerSpec) -> Self {
        Self {
            id,
            kind,
            name: spec.name.clone(),
            cell,
            pos: cell.center(),
            base_range: spec.range,
            range_bonus: 0.0,
            base_fire_rate: spec.fire_rate,
            fire_rate_bonus: 0.0,
            base_damage: spec.damage,
            damage_bonus: 0.0,
            projectile_speed: spec.projectile_speed,
            effect: spec.effect,
            cooldown: 0.0,
            level: 1,
            upgrade_cost: UPGRADE_CREDIT_COST,
        }
    }

    #[inline]
    pub fn range(&self) -> f32 {
        self.base_range + self.range_bonus
    }

    #[inline]
    pub fn fire_rate(&self) -> f32 {
        self.base_fire_rate + self.fire_rate_bonus
    }

    /// Seconds between shots
    #[inline]
    pub fn fire_interval(&self) -> f32 {
        1.0 / self.fire_rate()
    }

    #[inline]
    pub fn damage(&self) -> f32 {
        self.base_damage + self.damage_bonus
    }

    /// Living enemy in range that is furthest along the path
    ///
    /// Ties go to the first candidate in iteration order.
    pub fn find_target<'a>(&self, enemies: &'a [Enemy], path: &PathModel) -> Option<&'a Enemy> {
        let range = self.range();
        let mut chosen: Option<&Enemy> = None;
        for enemy in enemies.iter().filter(|e| e.alive) {
            if enemy.position(path).distance(self.pos) > range {
                continue;
            }
            if chosen.is_none_or(|best| enemy.path_progress() > best.path_progress()) {
                chosen = Some(enemy);
            }
        }
        chosen
    }

    /// Count down and pick a target once the cooldown has elapsed
    ///
    /// On a shot the cooldown restarts at exactly one fire interval; with no
    /// target it stays expired and the scan repeats next step.
    pub fn update(&mut self, dt: f32, enemies: &[Enemy], path: &PathModel) -> Option<EnemyId> {
        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return None;
        }
        let target = self.find_target(enemies, path)?.id;
        self.cooldown = self.fire_interval();
        Some(target)
    }

    /// Build the projectile for a shot at `target`
    pub fn fire(&self, id: u32, target: EnemyId) -> Projectile {
        Projectile {
            id,
            kind: self.kind,
            pos: self.pos,
            target,
            speed: self.projectile_speed,
            damage: self.damage(),
            effect: self.effect,
        }
    }

    /// Spend credits and raise the tower one level; returns the new level
    pub fn upgrade(&mut self, economy: &mut Economy) -> Result<u32, CommandError> {
        economy.spend_credits(self.upgrade_cost)?;
        self.level += 1;
        self.damage_bonus += self.base_damage * UPGRADE_DAMAGE_FRACTION;
        self.range_bonus += self.base_range * UPGRADE_RANGE_FRACTION;
        self.fire_rate_bonus += UPGRADE_FIRE_RATE_STEP;
        Ok(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::wave::WaveEntry;

    fn spec() -> TowerSpec {
        TowerSpec {
            name: "Test Tower".into(),
            cost: 45,
            range: 100.0,
            fire_rate: 2.0,
            damage: 20.0,
            projectile_speed: 300.0,
            effect: TowerEffect::Direct,
        }
    }

    fn path() -> PathModel {
        PathModel::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1000.0, 0.0)]).unwrap()
    }

    fn enemy_at(id: u32, progress: f32) -> Enemy {
        let mut enemy = Enemy::spawn(
            EnemyId(id),
            &WaveEntry {
                count: 1,
                health: 50.0,
                speed: 50.0,
                reward: 5,
                armor: 0.0,
                boss: false,
            },
        );
        enemy.progress = progress;
        enemy
    }

    /// Tower sitting 10 units above path x=100
    fn tower() -> Tower {
        let mut tower = Tower::new(TowerId(1), TowerKind::Flame, GridCell::new(0, 0), &spec());
        tower.pos = Vec2::new(100.0, 10.0);
        tower
    }

    #[test]
    fn test_targets_furthest_along() {
        let path = path();
        let tower = tower();
        // x = 60, 60, 140: two tied behind, one ahead
        let enemies = vec![enemy_at(1, 0.06), enemy_at(2, 0.06), enemy_at(3, 0.14)];
        assert_eq!(tower.find_target(&enemies, &path).unwrap().id, EnemyId(3));
    }

    #[test]
    fn test_tie_goes_to_first_found() {
        let path = path();
        let tower = tower();
        let enemies = vec![enemy_at(1, 0.1), enemy_at(2, 0.1)];
        assert_eq!(tower.find_target(&enemies, &path).unwrap().id, EnemyId(1));
    }

    #[test]
    fn test_ignores_out_of_range_and_dead() {
        let path = path();
        let tower = tower();
        let mut dead = enemy_at(1, 0.15);
        dead.alive = false;
        // x = 500 is far out of range
        let enemies = vec![dead, enemy_at(2, 0.5), enemy_at(3, 0.05)];
        assert_eq!(tower.find_target(&enemies, &path).unwrap().id, EnemyId(3));

        let enemies = vec![enemy_at(4, 0.5)];
        assert!(tower.find_target(&enemies, &path).is_none());
    }

    #[test]
    fn test_cooldown_gates_firing() {
        let path = path();
        let mut tower = tower();
        let enemies = vec![enemy_at(1, 0.1)];

        assert_eq!(tower.update(0.01, &enemies, &path), Some(EnemyId(1)));
        assert_eq!(tower.cooldown, 1.0 / 2.0);

        // Still cooling down
        assert!(tower.update(0.25, &enemies, &path).is_none());
        assert!(tower.cooldown > 0.0);
        assert_eq!(tower.update(0.25, &enemies, &path), Some(EnemyId(1)));
        assert_eq!(tower.cooldown, tower.fire_interval());
    }

    #[test]
    fn test_no_target_keeps_cooldown_expired() {
        let path = path();
        let mut tower = tower();
        assert!(tower.update(0.1, &[], &path).is_none());
        assert!(tower.cooldown <= 0.0);
        // Fires on the first step a target appears
        let enemies = vec![enemy_at(1, 0.1)];
        assert_eq!(tower.update(0.0, &enemies, &path), Some(EnemyId(1)));
    }

    #[test]
    fn test_upgrade_increments() {
        let mut tower = tower();
        let mut economy = Economy::new(0, 20);
        assert_eq!(tower.upgrade(&mut economy), Err(CommandError::NoUpgradeCredits));
        assert_eq!(tower.level, 1);

        economy.grant_credits(2);
        assert_eq!(tower.upgrade(&mut economy), Ok(2));
        assert_eq!(tower.upgrade(&mut economy), Ok(3));
        assert_eq!(economy.upgrade_credits, 0);
        assert!((tower.damage() - 26.0).abs() < 1e-4);
        assert!((tower.range() - 112.0).abs() < 1e-4);
        assert!((tower.fire_rate() - 2.14).abs() < 1e-4);
    }

    #[test]
    fn test_fire_carries_payload() {
        let mut slow_spec = spec();
        slow_spec.effect = TowerEffect::Slow {
            factor: 0.55,
            duration: 1.6,
        };
        let tower = Tower::new(TowerId(2), TowerKind::Frost, GridCell::new(2, 2), &slow_spec);
        let projectile = tower.fire(9, EnemyId(4));
        assert_eq!(projectile.pos, GridCell::new(2, 2).center());
        assert_eq!(projectile.target, EnemyId(4));
        assert_eq!(projectile.damage, 20.0);
        assert_eq!(projectile.effect, slow_spec.effect);
    }
}
