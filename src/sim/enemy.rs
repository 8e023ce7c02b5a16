//! Enemy variants
//!
//! Variants differ only in a parameter table, except Zigzag which also
//! sways sideways while it descends.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    Zigzag,
}

/// Per-variant stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyParams {
    pub health: i32,
    pub score_value: u32,
    pub damage_to_player: i32,
    /// Explosion particle count on death
    pub explosion_size: u32,
    /// Square side length
    pub size: f32,
    /// Multiplier applied to the rolled spawn speed
    pub speed_factor: f32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Zigzag,
    ];

    pub const fn params(self) -> EnemyParams {
        match self {
            EnemyKind::Basic => EnemyParams {
                health: 1,
                score_value: 10,
                damage_to_player: 1,
                explosion_size: 15,
                size: 25.0,
                speed_factor: 1.0,
            },
            EnemyKind::Fast => EnemyParams {
                health: 1,
                score_value: 15,
                damage_to_player: 1,
                explosion_size: 15,
                size: 20.0,
                speed_factor: 1.5,
            },
            EnemyKind::Tank => EnemyParams {
                health: 3,
                score_value: 30,
                damage_to_player: 2,
                explosion_size: 25,
                size: 35.0,
                speed_factor: 0.7,
            },
            EnemyKind::Zigzag => EnemyParams {
                health: 2,
                score_value: 25,
                damage_to_player: 1,
                explosion_size: 15,
                size: 28.0,
                speed_factor: 1.0,
            },
        }
    }

    /// Pick a variant from one uniform draw in [0, 1)
    ///
    /// Basic 50%, Fast 25%, Tank 15%, Zigzag 10%.
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.5 {
            EnemyKind::Basic
        } else if roll < 0.75 {
            EnemyKind::Fast
        } else if roll < 0.9 {
            EnemyKind::Tank
        } else {
            EnemyKind::Zigzag
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Fast => "fast",
            EnemyKind::Tank => "tank",
            EnemyKind::Zigzag => "zigzag",
        }
    }
}

/// Horizontal motion rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    Straight,
    /// x = anchor_x + sin(phase) * amplitude, phase advances by `frequency`
    Zigzag {
        anchor_x: f32,
        phase: f32,
        amplitude: f32,
        frequency: f32,
    },
}

/// An enemy entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per step downward
    pub speed: f32,
    /// May dip below zero for the rest of the frame it dies in
    pub health: i32,
    pub max_health: i32,
    pub motion: Motion,
}

impl Enemy {
    /// A new enemy; `base_speed` is scaled by the variant's speed factor
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, base_speed: f32) -> Self {
        let params = kind.params();
        let motion = match kind {
            EnemyKind::Zigzag => Motion::Zigzag {
                anchor_x: pos.x,
                phase: 0.0,
                amplitude: ZIGZAG_AMPLITUDE,
                frequency: ZIGZAG_FREQUENCY,
            },
            _ => Motion::Straight,
        };
        Self {
            id,
            kind,
            pos,
            size: Vec2::splat(params.size),
            speed: base_speed * params.speed_factor,
            health: params.health,
            max_health: params.health,
            motion,
        }
    }

    /// Descend one step (and sway, for Zigzag)
    pub fn update(&mut self, field_width: f32) {
        self.pos.y += self.speed;

        if let Motion::Zigzag {
            anchor_x,
            ref mut phase,
            amplitude,
            frequency,
        } = self.motion
        {
            *phase += frequency;
            let max_x = (field_width - self.size.x).max(0.0);
            self.pos.x = (anchor_x + phase.sin() * amplitude).clamp(0.0, max_x);
        }
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.health -= damage;
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// Health as a 0-1 fraction, clamped
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn score_value(&self) -> u32 {
        self.kind.params().score_value
    }

    pub fn damage_to_player(&self) -> i32 {
        self.kind.params().damage_to_player
    }

    pub fn explosion_size(&self) -> u32 {
        self.kind.params().explosion_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_variant_table() {
        let tank = EnemyKind::Tank.params();
        assert_eq!(tank.health, 3);
        assert_eq!(tank.score_value, 30);
        assert_eq!(tank.damage_to_player, 2);
        assert_eq!(tank.explosion_size, 25);

        let zigzag = EnemyKind::Zigzag.params();
        assert_eq!((zigzag.health, zigzag.score_value), (2, 25));
        assert_eq!(EnemyKind::Fast.params().score_value, 15);
        assert_eq!(EnemyKind::Basic.params().explosion_size, 15);
    }

    #[test]
    fn test_roll_boundaries() {
        assert_eq!(EnemyKind::from_roll(0.0), EnemyKind::Basic);
        assert_eq!(EnemyKind::from_roll(0.4999), EnemyKind::Basic);
        assert_eq!(EnemyKind::from_roll(0.5), EnemyKind::Fast);
        assert_eq!(EnemyKind::from_roll(0.75), EnemyKind::Tank);
        assert_eq!(EnemyKind::from_roll(0.9), EnemyKind::Zigzag);
        assert_eq!(EnemyKind::from_roll(0.9999), EnemyKind::Zigzag);
    }

    #[test]
    fn test_speed_factor_applied() {
        let fast = Enemy::new(1, EnemyKind::Fast, Vec2::ZERO, 2.0);
        let tank = Enemy::new(2, EnemyKind::Tank, Vec2::ZERO, 2.0);
        assert_eq!(fast.speed, 3.0);
        assert!((tank.speed - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_straight_descent() {
        let mut enemy = Enemy::new(1, EnemyKind::Basic, Vec2::new(100.0, -40.0), 2.5);
        enemy.update(FIELD_WIDTH);
        enemy.update(FIELD_WIDTH);
        assert_eq!(enemy.pos, Vec2::new(100.0, -35.0));
    }

    #[test]
    fn test_zigzag_sways_around_anchor() {
        let mut enemy = Enemy::new(1, EnemyKind::Zigzag, Vec2::new(300.0, 0.0), 1.0);
        enemy.update(FIELD_WIDTH);
        let expected = 300.0 + (0.05f32).sin() * 50.0;
        assert!((enemy.pos.x - expected).abs() < 1e-4);
        assert_eq!(enemy.pos.y, 1.0);
    }

    #[test]
    fn test_zigzag_clamped_to_field() {
        let mut enemy = Enemy::new(1, EnemyKind::Zigzag, Vec2::new(0.0, 0.0), 1.0);
        // Phase past pi swings the sine negative
        for _ in 0..80 {
            enemy.update(FIELD_WIDTH);
            assert!(enemy.pos.x >= 0.0);
        }
        let mut enemy = Enemy::new(2, EnemyKind::Zigzag, Vec2::new(FIELD_WIDTH - 28.0, 0.0), 1.0);
        for _ in 0..40 {
            enemy.update(FIELD_WIDTH);
            assert!(enemy.pos.x <= FIELD_WIDTH - 28.0);
        }
    }

    #[test]
    fn test_tank_needs_three_hits() {
        let mut tank = Enemy::new(1, EnemyKind::Tank, Vec2::ZERO, 1.0);
        tank.take_damage(1);
        tank.take_damage(1);
        assert!(!tank.is_destroyed());
        assert!((tank.health_ratio() - 1.0 / 3.0).abs() < 1e-6);
        tank.take_damage(1);
        assert!(tank.is_destroyed());
        tank.take_damage(1);
        assert_eq!(tank.health, -1);
        assert_eq!(tank.health_ratio(), 0.0);
    }

    proptest! {
        #[test]
        fn enemy_positions_stay_finite(
            kind_idx in 0usize..4,
            x in 0.0f32..760.0,
            speed in 0.0f32..10.0,
            steps in 0usize..1000,
        ) {
            let mut enemy = Enemy::new(1, EnemyKind::ALL[kind_idx], Vec2::new(x, ENEMY_SPAWN_Y), speed);
            for _ in 0..steps {
                enemy.update(FIELD_WIDTH);
            }
            prop_assert!(crate::is_finite_vec(enemy.pos));
        }
    }
}
