//! Data-driven game balance
//!
//! Tower catalog, wave table, path layout and starting resources. The default
//! reproduces the stock nine-wave campaign; alternative balance can be loaded
//! from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{BASE_TOWER_RANGE, STARTING_GOLD, STARTING_LIVES};
use crate::error::ConfigError;
use crate::sim::{GridCell, PathModel, TowerEffect, TowerKind, TowerSpec, WaveEntry};

/// Base stats for each tower kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerCatalog {
    pub flame: TowerSpec,
    pub frost: TowerSpec,
    pub tesla: TowerSpec,
}

impl TowerCatalog {
    pub fn get(&self, kind: TowerKind) -> &TowerSpec {
        match kind {
            TowerKind::Flame => &self.flame,
            TowerKind::Frost => &self.frost,
            TowerKind::Tesla => &self.tesla,
        }
    }
}

impl Default for TowerCatalog {
    fn default() -> Self {
        Self {
            flame: TowerSpec {
                name: "Flame Tower".into(),
                cost: 45,
                range: BASE_TOWER_RANGE,
                fire_rate: 1.25,
                damage: 22.0,
                projectile_speed: 380.0,
                effect: TowerEffect::Direct,
            },
            frost: TowerSpec {
                name: "Frost Tower".into(),
                cost: 55,
                range: BASE_TOWER_RANGE * 0.92,
                fire_rate: 1.0,
                damage: 12.0,
                projectile_speed: 320.0,
                effect: TowerEffect::Slow {
                    factor: 0.55,
                    duration: 1.6,
                },
            },
            tesla: TowerSpec {
                name: "Tesla Tower".into(),
                cost: 70,
                range: BASE_TOWER_RANGE * 1.05,
                fire_rate: 0.9,
                damage: 18.0,
                projectile_speed: 420.0,
                effect: TowerEffect::Chain {
                    radius: 110.0,
                    falloff: 0.55,
                },
            },
        }
    }
}

/// Complete balance sheet for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub starting_gold: u32,
    pub starting_lives: u32,
    pub towers: TowerCatalog,
    /// Path corner cells, start to exit
    pub path: Vec<GridCell>,
    pub waves: Vec<WaveEntry>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_gold: STARTING_GOLD,
            starting_lives: STARTING_LIVES,
            towers: TowerCatalog::default(),
            path: default_path(),
            waves: default_waves(),
        }
    }
}

impl Tuning {
    /// Parse and validate a balance document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a balance document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!(
            "Loaded tuning from {} ({} waves)",
            path.display(),
            tuning.waves.len()
        );
        Ok(tuning)
    }

    /// Build the path model for this layout
    pub fn path_model(&self) -> Result<PathModel, ConfigError> {
        Ok(PathModel::from_cells(&self.path)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.path_model()?;
        if self.waves.is_empty() {
            return Err(ConfigError::NoWaves);
        }
        for kind in TowerKind::ALL {
            let spec = self.towers.get(kind);
            for (field, value) in [
                ("fire_rate", spec.fire_rate),
                ("projectile_speed", spec.projectile_speed),
            ] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ConfigError::InvalidTower {
                        tower: spec.name.clone(),
                        field,
                        value,
                    });
                }
            }
        }
        for (i, wave) in self.waves.iter().enumerate() {
            if wave.armor >= 1.0 {
                log::warn!("Wave {} armor {} makes enemies immune", i + 1, wave.armor);
            }
        }
        Ok(())
    }
}

fn default_path() -> Vec<GridCell> {
    [
        (0, 3),
        (4, 3),
        (4, 1),
        (9, 1),
        (9, 5),
        (13, 5),
        (13, 9),
        (17, 9),
        (17, 6),
        (19, 6),
    ]
    .into_iter()
    .map(|(col, row)| GridCell::new(col, row))
    .collect()
}

fn default_waves() -> Vec<WaveEntry> {
    let wave = |count, health, speed, reward, armor, boss| WaveEntry {
        count,
        health,
        speed,
        reward,
        armor,
        boss,
    };
    vec![
        wave(8, 28.0, 45.0, 6, 0.0, false),
        wave(10, 36.0, 55.0, 7, 0.0, false),
        wave(12, 44.0, 62.0, 8, 0.0, false),
        wave(14, 60.0, 70.0, 9, 0.0, false),
        wave(12, 90.0, 56.0, 10, 0.12, false),
        wave(16, 95.0, 78.0, 10, 0.0, false),
        wave(18, 120.0, 82.0, 11, 0.18, false),
        wave(12, 200.0, 85.0, 13, 0.22, false),
        wave(1, 600.0, 70.0, 40, 0.3, true),
    ]
}
