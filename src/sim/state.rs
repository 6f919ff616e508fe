//! Game state and player commands
//!
//! `GameState` is the single owned simulation record. The host mutates it
//! only through `tick` and the command methods here, which run between steps.

use serde::Serialize;

use super::economy::Economy;
use super::enemy::{Enemy, EnemyId};
use super::grid::{GridCell, is_path_cell};
use super::path::PathModel;
use super::projectile::Projectile;
use super::tower::{Tower, TowerId, TowerKind};
use super::wave::WaveDirector;
use crate::consts::MAX_GAME_SPEED;
use crate::error::{CommandError, ConfigError};
use crate::tuning::Tuning;

/// Overall run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Building and fighting waves
    Playing,
    /// Final wave drained with lives left
    Victory,
    /// Lives reached zero
    Defeat,
}

/// Notable things that happened, in order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    WaveStarted { wave: usize, boss: bool },
    EnemyKilled { id: EnemyId, reward: u32, boss: bool },
    EnemyBreached { id: EnemyId, lives_left: u32 },
    WaveCleared { wave: usize },
    TowerPlaced { id: TowerId, kind: TowerKind, cell: GridCell },
    TowerUpgraded { id: TowerId, level: u32 },
    Victory,
    Defeat,
}

/// Pending events kept for the host; oldest are dropped beyond this
pub const MAX_PENDING_EVENTS: usize = 256;

const READY_MESSAGE: &str = "Ready! Pick a tower and click the board.";

/// Complete simulation state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Balance sheet the run was created from
    #[serde(skip)]
    pub tuning: Tuning,
    pub path: PathModel,
    pub economy: Economy,
    pub waves: WaveDirector,
    pub phase: GamePhase,
    /// Active enemies (sorted by id; ids only grow, so pushes keep the order)
    pub enemies: Vec<Enemy>,
    /// Placed towers (sorted by id)
    pub towers: Vec<Tower>,
    /// Projectiles in flight (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Tower kind placed by `interact`
    pub selected: TowerKind,
    /// Game speed multiplier applied to every step
    pub speed: f32,
    /// Simulated seconds since the last reset
    pub time: f32,
    /// Human-readable status line
    pub message: String,
    /// Events not yet drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh run from a balance sheet
    pub fn new(tuning: Tuning) -> Result<Self, ConfigError> {
        let path = tuning.path_model()?;
        Ok(Self {
            path,
            economy: Economy::new(tuning.starting_gold, tuning.starting_lives),
            waves: WaveDirector::new(tuning.waves.clone()),
            tuning,
            phase: GamePhase::Playing,
            enemies: Vec::new(),
            towers: Vec::new(),
            projectiles: Vec::new(),
            selected: TowerKind::default(),
            speed: 1.0,
            time: 0.0,
            message: READY_MESSAGE.to_string(),
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Look up an enemy by handle; `None` once it has been removed
    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemy_index(id).map(|i| &self.enemies[i])
    }

    pub(crate) fn enemy_index(&self, id: EnemyId) -> Option<usize> {
        self.enemies.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn living_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn tower_at(&self, cell: GridCell) -> Option<&Tower> {
        self.towers.iter().find(|t| t.cell == cell)
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Record an event for the host and update the status line
    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.message = match &event {
            GameEvent::WaveStarted { boss: true, .. } => "The boss is coming! Get ready!".into(),
            GameEvent::WaveStarted { wave, .. } => format!("Wave #{} started!", wave + 1),
            GameEvent::EnemyKilled { boss: true, .. } => {
                "Boss destroyed! +2 upgrade credits".into()
            }
            GameEvent::EnemyKilled { .. } => "Enemy defeated, bonus gold!".into(),
            GameEvent::EnemyBreached { .. } => "An enemy broke through!".into(),
            GameEvent::WaveCleared { .. } => "Wave cleared! Bring on the next one.".into(),
            GameEvent::TowerPlaced { kind, .. } => {
                format!("{} built!", self.tuning.towers.get(*kind).name)
            }
            GameEvent::TowerUpgraded { id, level } => {
                let name = self
                    .towers
                    .iter()
                    .find(|t| t.id == *id)
                    .map_or("Tower", |t| t.name.as_str());
                format!("{name} upgraded (Lv.{level})")
            }
            GameEvent::Victory => "Victory! Every wave has been stopped.".into(),
            GameEvent::Defeat => "The crystal has fallen! Reset to try again.".into(),
        };
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Report a rejected command on the status line and hand it back
    fn reject(&mut self, err: CommandError) -> CommandError {
        log::debug!("Command rejected: {err}");
        self.message = err.to_string();
        err
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check whether `kind` could be built on `cell` right now
    pub fn check_placement(&self, cell: GridCell, kind: TowerKind) -> Result<(), CommandError> {
        if self.is_over() {
            return Err(CommandError::GameOver);
        }
        if !cell.in_bounds() {
            return Err(CommandError::OutOfBounds(cell));
        }
        if is_path_cell(&self.tuning.path, cell) {
            return Err(CommandError::PathCell);
        }
        if self.tower_at(cell).is_some() {
            return Err(CommandError::CellOccupied);
        }
        let cost = self.tuning.towers.get(kind).cost;
        if !self.economy.can_afford(cost) {
            return Err(CommandError::InsufficientGold {
                cost,
                gold: self.economy.gold,
            });
        }
        Ok(())
    }

    /// Build a tower, paying its cost in full
    pub fn place_tower(&mut self, cell: GridCell, kind: TowerKind) -> Result<TowerId, CommandError> {
        if let Err(err) = self.check_placement(cell, kind) {
            return Err(self.reject(err));
        }
        let spec = self.tuning.towers.get(kind).clone();
        if let Err(err) = self.economy.spend(spec.cost) {
            return Err(self.reject(err));
        }
        let id = TowerId(self.next_entity_id());
        self.towers.push(Tower::new(id, kind, cell, &spec));
        log::info!("{} placed at {} for {}g", spec.name, cell, spec.cost);
        self.emit(GameEvent::TowerPlaced { id, kind, cell });
        Ok(id)
    }

    /// Spend an upgrade credit on the tower at `cell`; returns its new level
    pub fn upgrade_tower(&mut self, cell: GridCell) -> Result<u32, CommandError> {
        if self.is_over() {
            return Err(self.reject(CommandError::GameOver));
        }
        let Some(index) = self.towers.iter().position(|t| t.cell == cell) else {
            return Err(self.reject(CommandError::NoTower));
        };
        let tower = &mut self.towers[index];
        match tower.upgrade(&mut self.economy) {
            Ok(level) => {
                let id = tower.id;
                log::info!("{} at {} upgraded to level {}", tower.name, cell, level);
                self.emit(GameEvent::TowerUpgraded { id, level });
                Ok(level)
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Board click: upgrade the tower on `cell`, or build the selected kind
    pub fn interact(&mut self, cell: GridCell) -> Result<(), CommandError> {
        if self.tower_at(cell).is_some() {
            self.upgrade_tower(cell).map(|_| ())
        } else {
            self.place_tower(cell, self.selected).map(|_| ())
        }
    }

    pub fn select_tower(&mut self, kind: TowerKind) {
        self.selected = kind;
        self.message = format!(
            "{} selected. Click the board to build it!",
            self.tuning.towers.get(kind).name
        );
    }

    /// Set the game speed multiplier; returns the value actually applied
    pub fn set_speed(&mut self, multiplier: f32) -> f32 {
        self.speed = if multiplier.is_finite() && multiplier > 0.0 {
            multiplier.min(MAX_GAME_SPEED)
        } else {
            1.0
        };
        self.speed
    }

    /// Launch the next wave from the table
    pub fn start_next_wave(&mut self) -> Result<(), CommandError> {
        match self.phase {
            GamePhase::Playing => {}
            GamePhase::Victory => return Err(self.reject(CommandError::AllWavesComplete)),
            GamePhase::Defeat => return Err(self.reject(CommandError::GameOver)),
        }
        match self.waves.start_next_wave() {
            Ok(entry) => {
                let boss = entry.boss;
                let wave = self.waves.current_index().unwrap_or_default();
                self.emit(GameEvent::WaveStarted { wave, boss });
                Ok(())
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Discard every entity and restore the starting economy and waves
    ///
    /// Tuning, game speed and the selected tower kind survive a reset.
    pub fn reset(&mut self) {
        self.economy = Economy::new(self.tuning.starting_gold, self.tuning.starting_lives);
        self.waves.reset();
        self.phase = GamePhase::Playing;
        self.enemies.clear();
        self.towers.clear();
        self.projectiles.clear();
        self.events.clear();
        self.time = 0.0;
        self.next_id = 1;
        self.message = "Game reset! Pick a tower and start the wave.".to_string();
        log::info!("Game reset");
    }
}
