//! Read-only view of the simulation for presentation
//!
//! Positions are resolved against the path so a renderer or test never needs
//! to know how enemies store their progress.

use glam::Vec2;
use serde::Serialize;

use super::enemy::EnemyId;
use super::grid::GridCell;
use super::state::{GamePhase, GameState};
use super::tower::{TowerId, TowerKind};
use super::wave::WaveState;

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// 0..1 for health bars
    pub health_fraction: f32,
    pub slowed: bool,
    pub boss: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TowerView {
    pub id: TowerId,
    pub kind: TowerKind,
    pub cell: GridCell,
    pub pos: Vec2,
    pub range: f32,
    pub level: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub kind: TowerKind,
    pub pos: Vec2,
    /// Where the target currently stands (None once stale)
    pub target_pos: Option<Vec2>,
}

/// Heads-up display counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub gold: u32,
    pub lives: u32,
    pub upgrade_credits: u32,
    /// One-based wave number (0 before the first wave)
    pub wave: usize,
    pub total_waves: usize,
    pub living_enemies: usize,
    pub wave_state: WaveState,
    pub speed: f32,
    pub selected: TowerKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time: f32,
    pub phase: GamePhase,
    pub hud: Hud,
    pub message: String,
    pub path: Vec<Vec2>,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
}

impl GameState {
    pub fn hud(&self) -> Hud {
        Hud {
            gold: self.economy.gold,
            lives: self.economy.lives,
            upgrade_credits: self.economy.upgrade_credits,
            wave: self.waves.wave_number(),
            total_waves: self.waves.total_waves(),
            living_enemies: self.living_enemies(),
            wave_state: self.waves.state(),
            speed: self.speed,
            selected: self.selected,
        }
    }

    /// Capture everything a renderer needs for one frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.time,
            phase: self.phase,
            hud: self.hud(),
            message: self.message.clone(),
            path: self.path.waypoints().to_vec(),
            enemies: self
                .enemies
                .iter()
                .filter(|e| e.alive)
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.position(&self.path),
                    health: e.health,
                    max_health: e.max_health,
                    health_fraction: e.health_fraction(),
                    slowed: e.is_slowed(),
                    boss: e.is_boss,
                })
                .collect(),
            towers: self
                .towers
                .iter()
                .map(|t| TowerView {
                    id: t.id,
                    kind: t.kind,
                    cell: t.cell,
                    pos: t.pos,
                    range: t.range(),
                    level: t.level,
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    kind: p.kind,
                    pos: p.pos,
                    target_pos: self
                        .enemy(p.target)
                        .filter(|e| e.alive)
                        .map(|e| e.position(&self.path)),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(Tuning::default()).unwrap();
        state.place_tower(GridCell::new(2, 2), TowerKind::Frost).unwrap();
        state.start_next_wave().unwrap();

        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(
            snapshot.hud,
            Hud {
                gold: 65,
                lives: 20,
                upgrade_credits: 0,
                wave: 1,
                total_waves: 9,
                living_enemies: 0,
                wave_state: WaveState::Spawning,
                speed: 1.0,
                selected: TowerKind::Flame,
            }
        );
        assert_eq!(snapshot.towers.len(), 1);
        assert_eq!(snapshot.towers[0].pos, GridCell::new(2, 2).center());
        assert_eq!(snapshot.path.len(), 10);
        assert_eq!(snapshot.message, "Wave #1 started!");
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(Tuning::default()).unwrap();
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["hud"]["gold"], 120);
        assert_eq!(json["phase"], "Playing");
        assert_eq!(json["hud"]["selected"], "flame");
    }
}
