//! Error types
//!
//! Rejected player commands are ordinary outcomes, not failures of the
//! simulation: each variant leaves the state untouched.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::GridCell;

/// Why a player command was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("cell {0} is outside the board")]
    OutOfBounds(GridCell),
    #[error("cannot build on the path")]
    PathCell,
    #[error("a tower already stands on this cell")]
    CellOccupied,
    #[error("not enough gold: need {cost}, have {gold}")]
    InsufficientGold { cost: u32, gold: u32 },
    #[error("no tower on this cell")]
    NoTower,
    #[error("no upgrade credits left; clear waves (+1) or defeat the boss (+2)")]
    NoUpgradeCredits,
    #[error("a wave is already in progress")]
    WaveInProgress,
    #[error("every wave has already been survived")]
    AllWavesComplete,
    #[error("the game is over; reset to play again")]
    GameOver,
}

/// A path that cannot drive enemy movement
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("path needs at least two waypoints, got {0}")]
    TooFewWaypoints(usize),
    #[error("waypoint {index} coincides with the next waypoint")]
    ZeroLengthSegment { index: usize },
}

/// Failure loading tuning or settings documents
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("wave table is empty")]
    NoWaves,
    #[error("{tower}: {field} must be a positive number, got {value}")]
    InvalidTower {
        tower: String,
        field: &'static str,
        value: f32,
    },
}
