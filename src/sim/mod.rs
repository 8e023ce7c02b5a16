//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - One step per rendered frame, movement in pixels per step
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod collision;
pub mod enemy;
pub mod entity;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, intersects};
pub use enemy::{Enemy, EnemyKind, EnemyParams, Motion};
pub use entity::{Bullet, Particle, ParticleKind, Player};
pub use spawner::{SpawnTuning, Spawner, spawn_enemy};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, resolve_collisions, tick};
