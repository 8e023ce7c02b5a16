//! Star Strike - a single-screen arcade shoot-'em-up
//!
//! Core modules:
//! - `sim`: Per-frame simulation (entities, spawning, collisions, session phases)
//! - `game`: Frame driver (timestamps in, drawables and HUD scalars out)
//! - `renderer`: Scene description and the browser canvas painter
//! - `config`: Field dimensions and tunables
//! - `error`: Boundary validation errors

pub mod config;
pub mod error;
pub mod game;
pub mod renderer;
pub mod sim;

pub use config::Config;
pub use error::GameError;
pub use game::{FrameClock, FrameOutput, Game};

use glam::Vec2;

/// Game configuration constants
///
/// Distances are pixels, durations without a unit are simulation steps
/// (one step per rendered frame).
pub mod consts {
    /// Default playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Smallest playfield accepted by config validation
    pub const MIN_FIELD_SIZE: f32 = 100.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance of the spawn point above the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 50.0;
    pub const PLAYER_SHOOT_COOLDOWN: u32 = 15;
    /// Post-hit flash duration (1 second at 60 fps)
    pub const PLAYER_HIT_FLASH: u32 = 60;
    /// Length of one visible/invisible block of the hit flash
    pub const PLAYER_FLASH_BLOCK: u32 = 5;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 8.0;

    /// Enemies enter above the top edge
    pub const ENEMY_SPAWN_Y: f32 = -40.0;
    /// Spawn x is drawn from [0, field_width - ENEMY_SPAWN_MARGIN)
    pub const ENEMY_SPAWN_MARGIN: f32 = 40.0;
    pub const ZIGZAG_AMPLITUDE: f32 = 50.0;
    pub const ZIGZAG_FREQUENCY: f32 = 0.05;

    /// Particles spawned when a bullet hits without killing
    pub const HIT_PARTICLES: u32 = 5;
    /// Per-step velocity damping
    pub const PARTICLE_DAMPING: f32 = 0.98;

    /// Difficulty ramp (milliseconds)
    pub const SPAWN_DELAY_INITIAL_MS: f32 = 1000.0;
    pub const SPAWN_DELAY_STEP_MS: f32 = 10.0;
    pub const SPAWN_DELAY_MIN_MS: f32 = 500.0;

    /// Session defaults
    pub const STARTING_LIVES: i32 = 3;
    pub const STARTING_LEVEL: u32 = 1;

    /// Largest frame delta handed to the simulation (ms)
    pub const MAX_FRAME_DELTA_MS: f64 = 250.0;

    /// Background starfield
    pub const STAR_COUNT: u32 = 100;
}

/// Center point of an axis-aligned box
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}

/// True when every component is finite
#[inline]
pub fn is_finite_vec(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
