//! Runtime settings for the host loop
//!
//! Loaded from an optional JSON file; any missing field falls back to its
//! default. Game balance lives in `Tuning`, not here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_GAME_SPEED, MAX_SUBSTEPS, SIM_DT};
use crate::error::ConfigError;

/// Simulation rate presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StepPreset {
    /// 60 Hz
    Coarse,
    /// 120 Hz
    #[default]
    Standard,
    /// 240 Hz
    Fine,
}

impl StepPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepPreset::Coarse => "Coarse",
            StepPreset::Standard => "Standard",
            StepPreset::Fine => "Fine",
        }
    }

    /// Fixed step length in seconds
    pub fn fixed_dt(&self) -> f32 {
        match self {
            StepPreset::Coarse => 1.0 / 60.0,
            StepPreset::Standard => SIM_DT,
            StepPreset::Fine => 1.0 / 240.0,
        }
    }
}

/// Host loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation rate
    pub step: StepPreset,
    /// Most fixed steps run for one frame
    pub max_substeps: u32,
    /// Longest frame time accepted before clamping (seconds)
    pub max_frame_dt: f32,

    // === Gameplay ===
    /// Initial game speed multiplier
    pub game_speed: f32,
    /// Optional balance document replacing the stock campaign
    pub tuning: Option<PathBuf>,

    // === Demo ===
    /// Seed for the autopilot
    pub seed: u64,
    /// Frames per second simulated by the headless demo
    pub demo_fps: u32,
    /// Demo gives up after this many simulated seconds
    pub demo_time_limit: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            step: StepPreset::Standard,
            max_substeps: MAX_SUBSTEPS,
            max_frame_dt: MAX_FRAME_DT,

            game_speed: 1.0,
            tuning: None,

            seed: 12345,
            demo_fps: 60,
            demo_time_limit: 1800.0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, clamping out-of-range values
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Fixed step length in seconds
    pub fn fixed_dt(&self) -> f32 {
        self.step.fixed_dt()
    }

    /// Frame length used by the headless demo
    pub fn demo_frame_dt(&self) -> f32 {
        1.0 / self.demo_fps as f32
    }

    fn sanitize(&mut self) {
        self.max_substeps = self.max_substeps.max(1);
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            log::warn!("Invalid max_frame_dt {}, using default", self.max_frame_dt);
            self.max_frame_dt = MAX_FRAME_DT;
        }
        if !(self.game_speed.is_finite() && self.game_speed > 0.0) {
            log::warn!("Invalid game_speed {}, using 1.0", self.game_speed);
            self.game_speed = 1.0;
        }
        self.game_speed = self.game_speed.min(MAX_GAME_SPEED);
        self.demo_fps = self.demo_fps.clamp(1, 1000);
        if !(self.demo_time_limit.is_finite() && self.demo_time_limit > 0.0) {
            self.demo_time_limit = Self::default().demo_time_limit;
        }
    }
}
