//! Session configuration
//!
//! Supplied once when a session is created. Every field has a default, so a
//! JSON document only needs the keys it wants to override.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::sim::spawner::SpawnTuning;

/// Playfield size and gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,

    // === Session ===
    /// Lives at session start
    pub starting_lives: i32,
    /// Difficulty level (adds 0.5 px/step to every spawned enemy per level)
    pub starting_level: u32,
    /// Seed for the deterministic RNG
    pub seed: u64,
    /// Spawn one enemy the moment the session starts
    pub spawn_on_start: bool,

    // === Difficulty ramp (ms) ===
    pub spawn_delay_initial_ms: f32,
    pub spawn_delay_step_ms: f32,
    pub spawn_delay_min_ms: f32,

    // === Frame driver ===
    /// Frame deltas above this are clamped (stalled tab, debugger pause)
    pub max_frame_delta_ms: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            starting_lives: STARTING_LIVES,
            starting_level: STARTING_LEVEL,
            seed: 0x5EED,
            spawn_on_start: true,

            spawn_delay_initial_ms: SPAWN_DELAY_INITIAL_MS,
            spawn_delay_step_ms: SPAWN_DELAY_STEP_MS,
            spawn_delay_min_ms: SPAWN_DELAY_MIN_MS,

            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
        }
    }
}

impl Config {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: field {}x{}, seed {}",
            config.field_width,
            config.field_height,
            config.seed
        );
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Same config with a different RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Playfield dimensions as a vector
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Difficulty ramp parameters for the spawner
    pub fn spawn_tuning(&self) -> SpawnTuning {
        SpawnTuning {
            initial_delay_ms: self.spawn_delay_initial_ms,
            delay_step_ms: self.spawn_delay_step_ms,
            min_delay_ms: self.spawn_delay_min_ms,
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        check_at_least("field_width", self.field_width as f64, MIN_FIELD_SIZE as f64)?;
        check_at_least("field_height", self.field_height as f64, MIN_FIELD_SIZE as f64)?;
        check_at_least("starting_lives", self.starting_lives as f64, 1.0)?;
        check_at_least("spawn_delay_min_ms", self.spawn_delay_min_ms as f64, 1.0)?;
        check_at_least(
            "spawn_delay_initial_ms",
            self.spawn_delay_initial_ms as f64,
            self.spawn_delay_min_ms as f64,
        )?;
        check_at_least("spawn_delay_step_ms", self.spawn_delay_step_ms as f64, 0.0)?;
        check_at_least("max_frame_delta_ms", self.max_frame_delta_ms, 1.0)?;
        Ok(())
    }
}

fn check_at_least(field: &'static str, value: f64, min: f64) -> Result<(), GameError> {
    if !value.is_finite() {
        return Err(GameError::InvalidConfig {
            field,
            value,
            reason: "must be finite",
        });
    }
    if value < min {
        return Err(GameError::InvalidConfig {
            field,
            value,
            reason: "below the accepted minimum",
        });
    }
    Ok(())
}
