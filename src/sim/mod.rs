//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod economy;
pub mod enemy;
pub mod grid;
pub mod path;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod tower;
pub mod wave;

pub use clock::SimulationClock;
pub use economy::Economy;
pub use enemy::{Enemy, EnemyId, Kill};
pub use grid::{GridCell, is_path_cell};
pub use path::PathModel;
pub use projectile::{Flight, Projectile, resolve_hit};
pub use snapshot::{EnemyView, Hud, ProjectileView, Snapshot, TowerView};
pub use state::{GameEvent, GamePhase, GameState, MAX_PENDING_EVENTS};
pub use tick::tick;
pub use tower::{Tower, TowerEffect, TowerId, TowerKind, TowerSpec};
pub use wave::{WaveCompletion, WaveDirector, WaveEntry, WaveState};
