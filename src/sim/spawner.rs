//! Enemy spawning and the difficulty ramp
//!
//! The spawn delay only ever shrinks during a session: every spawn takes a
//! fixed step off it until it reaches the floor. Only a restart puts it back.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use crate::consts::*;

/// Ramp parameters (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTuning {
    pub initial_delay_ms: f32,
    pub delay_step_ms: f32,
    pub min_delay_ms: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            initial_delay_ms: SPAWN_DELAY_INITIAL_MS,
            delay_step_ms: SPAWN_DELAY_STEP_MS,
            min_delay_ms: SPAWN_DELAY_MIN_MS,
        }
    }
}

/// Spawn cadence timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Time since the last spawn (ms)
    pub accumulator_ms: f32,
    /// Current threshold (ms)
    pub delay_ms: f32,
    tuning: SpawnTuning,
}

impl Spawner {
    pub fn new(tuning: SpawnTuning) -> Self {
        Self {
            accumulator_ms: 0.0,
            delay_ms: tuning.initial_delay_ms,
            tuning,
        }
    }

    /// Advance by one frame; true when an enemy is due
    ///
    /// At most one spawn per call, however long the frame was.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        self.accumulator_ms += dt_ms;
        if self.accumulator_ms > self.delay_ms {
            self.accumulator_ms = 0.0;
            self.delay_ms = (self.delay_ms - self.tuning.delay_step_ms).max(self.tuning.min_delay_ms);
            true
        } else {
            false
        }
    }

    /// Zero the accumulator without touching the ramp
    pub fn reset_timer(&mut self) {
        self.accumulator_ms = 0.0;
    }
}

/// Roll a new enemy above the top edge
///
/// Draw order: x, speed, variant.
pub fn spawn_enemy<R: Rng + ?Sized>(rng: &mut R, id: u32, field_width: f32, level: u32) -> Enemy {
    let x = rng.random::<f32>() * (field_width - ENEMY_SPAWN_MARGIN).max(0.0);
    let base_speed = 1.0 + rng.random::<f32>() * 3.0 + level as f32 * 0.5;
    let kind = EnemyKind::from_roll(rng.random::<f32>());
    Enemy::new(id, kind, Vec2::new(x, ENEMY_SPAWN_Y), base_speed)
}
