//! Player, bullet and particle entities
//!
//! Entities hold no references to each other or to the session. Anything an
//! entity wants to create (a bullet, a particle burst) is returned to the
//! caller, which owns the collections.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::tick::TickInput;
use crate::consts::*;

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per step on each held axis
    pub speed: f32,
    /// Steps until the next shot is allowed
    pub shoot_cooldown: u32,
    /// Steps of post-hit flash remaining
    pub hit_timer: u32,
}

impl Player {
    /// Ship at the standard spawn point for a field, kept inside the field
    pub fn spawn(field: Vec2) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        let pos = Vec2::new(field.x / 2.0, field.y - PLAYER_SPAWN_OFFSET)
            .clamp(Vec2::ZERO, (field - size).max(Vec2::ZERO));
        Self {
            pos,
            size,
            speed: PLAYER_SPEED,
            shoot_cooldown: 0,
            hit_timer: 0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Move per held direction and count timers down
    ///
    /// A move that would leave `[0, field - size]` stops at the edge.
    pub fn update(&mut self, input: &TickInput, field: Vec2) {
        let max = (field - self.size).max(Vec2::ZERO);

        if input.left && self.pos.x > 0.0 {
            self.pos.x = (self.pos.x - self.speed).max(0.0);
        }
        if input.right && self.pos.x < max.x {
            self.pos.x = (self.pos.x + self.speed).min(max.x);
        }
        if input.up && self.pos.y > 0.0 {
            self.pos.y = (self.pos.y - self.speed).max(0.0);
        }
        if input.down && self.pos.y < max.y {
            self.pos.y = (self.pos.y + self.speed).min(max.y);
        }

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        self.hit_timer = self.hit_timer.saturating_sub(1);
    }

    /// Fire a bullet from the nose of the ship, if the cooldown allows
    pub fn shoot(&mut self) -> Option<Bullet> {
        if self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = PLAYER_SHOOT_COOLDOWN;
        let x = self.pos.x + self.size.x / 2.0 - BULLET_WIDTH / 2.0;
        Some(Bullet::new(Vec2::new(x, self.pos.y)))
    }

    /// Start the hit flash. Lives are the session's business.
    pub fn hit(&mut self) {
        self.hit_timer = PLAYER_HIT_FLASH;
    }

    /// False on the "off" blocks of the hit flash
    pub fn is_visible(&self) -> bool {
        !(self.hit_timer > 0 && (self.hit_timer / PLAYER_FLASH_BLOCK) % 2 == 1)
    }
}

/// A player bullet travelling straight up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Bullet {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            speed: BULLET_SPEED,
        }
    }

    pub fn update(&mut self) {
        self.pos.y -= self.speed;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Past the top edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.y < 0.0
    }
}

/// Particle flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Large, slow-fading burst when an enemy dies
    Explosion,
    /// Small spark when a bullet lands without killing
    Hit,
}

impl ParticleKind {
    /// Maximum speed per axis (velocity is drawn from `[-spread/2, spread/2)`)
    pub fn spread(self) -> f32 {
        match self {
            ParticleKind::Explosion => 10.0,
            ParticleKind::Hit => 6.0,
        }
    }

    /// Lifetime in steps
    pub fn life(self) -> u32 {
        match self {
            ParticleKind::Explosion => 30,
            ParticleKind::Hit => 15,
        }
    }

    /// (minimum size, random extra size)
    fn size_range(self) -> (f32, f32) {
        match self {
            ParticleKind::Explosion => (2.0, 4.0),
            ParticleKind::Hit => (1.0, 2.0),
        }
    }
}

/// A purely visual particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Steps remaining; removed at 0
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
}

impl Particle {
    /// A particle at `origin` with a random velocity and size for its kind
    pub fn spawn<R: Rng + ?Sized>(kind: ParticleKind, origin: Vec2, rng: &mut R) -> Self {
        let spread = kind.spread();
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * spread,
            (rng.random::<f32>() - 0.5) * spread,
        );
        let (min_size, extra) = kind.size_range();
        let life = kind.life();
        Self {
            kind,
            pos: origin,
            vel,
            life,
            max_life: life,
            size: rng.random::<f32>() * extra + min_size,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        self.vel *= PARTICLE_DAMPING;
    }

    pub fn is_dead(&self) -> bool {
        self.life == 0
    }

    /// Remaining life as a 0-1 fraction (used as draw alpha)
    pub fn life_fraction(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Push `count` particles of one kind, all starting at `origin`
pub fn emit_particles<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    kind: ParticleKind,
    origin: Vec2,
    count: u32,
) {
    particles.reserve(count as usize);
    for _ in 0..count {
        particles.push(Particle::spawn(kind, origin, rng));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> Vec2 {
        Vec2::new(FIELD_WIDTH, FIELD_HEIGHT)
    }

    #[test]
    fn test_spawn_position() {
        let player = Player::spawn(field());
        assert_eq!(player.pos, Vec2::new(400.0, 550.0));
        assert_eq!(player.size, Vec2::splat(40.0));
    }

    #[test]
    fn test_move_stops_at_edges() {
        let mut player = Player::spawn(field());
        player.pos = Vec2::new(2.0, 558.0);
        let input = TickInput {
            left: true,
            down: true,
            ..Default::default()
        };
        player.update(&input, field());
        assert_eq!(player.pos, Vec2::new(0.0, 560.0));

        // Already at the edge: nothing changes
        player.update(&input, field());
        assert_eq!(player.pos, Vec2::new(0.0, 560.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut player = Player::spawn(field());
        let start = player.pos;
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        player.update(&input, field());
        assert_eq!(player.pos, start);
    }

    #[test]
    fn test_shoot_respects_cooldown() {
        let mut player = Player::spawn(field());
        assert!(player.shoot().is_some());
        assert!(player.shoot().is_none());

        let idle = TickInput::default();
        for _ in 0..PLAYER_SHOOT_COOLDOWN - 1 {
            player.update(&idle, field());
            assert!(player.shoot().is_none());
        }
        player.update(&idle, field());
        assert!(player.shoot().is_some());
    }

    #[test]
    fn test_bullet_leaves_from_ship_center() {
        let mut player = Player::spawn(field());
        let bullet = player.shoot().unwrap();
        assert_eq!(bullet.bounds().center().x, player.bounds().center().x);
        assert_eq!(bullet.pos.y, player.pos.y);
    }

    #[test]
    fn test_hit_flash_pattern() {
        let mut player = Player::spawn(field());
        assert!(player.is_visible());
        player.hit();
        assert_eq!(player.hit_timer, PLAYER_HIT_FLASH);

        // 60 / 5 = 12 (even) -> visible, 59 / 5 = 11 (odd) -> hidden
        assert!(player.is_visible());
        player.update(&TickInput::default(), field());
        assert!(!player.is_visible());

        for _ in 0..PLAYER_HIT_FLASH {
            player.update(&TickInput::default(), field());
        }
        assert_eq!(player.hit_timer, 0);
        assert!(player.is_visible());
    }

    #[test]
    fn test_bullet_moves_up_and_leaves() {
        let mut bullet = Bullet::new(Vec2::new(100.0, 5.0));
        bullet.update();
        assert_eq!(bullet.pos, Vec2::new(100.0, -3.0));
        assert!(bullet.is_off_screen());
    }

    #[test]
    fn test_particle_lifetime() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particle = Particle::spawn(ParticleKind::Hit, Vec2::ZERO, &mut rng);
        assert_eq!(particle.life, 15);
        assert!(particle.vel.x.abs() <= 3.0 && particle.vel.y.abs() <= 3.0);
        assert!((1.0..3.0).contains(&particle.size));
        for _ in 0..15 {
            assert!(!particle.is_dead());
            particle.update();
        }
        assert!(particle.is_dead());
        assert_eq!(particle.life_fraction(), 0.0);
    }

    #[test]
    fn test_emit_particles_count() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut particles = Vec::new();
        emit_particles(
            &mut particles,
            &mut rng,
            ParticleKind::Explosion,
            Vec2::new(10.0, 10.0),
            25,
        );
        assert_eq!(particles.len(), 25);
        assert!(particles.iter().all(|p| p.life == 30));
    }

    proptest! {
        #[test]
        fn player_stays_in_field(
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..400),
            width in 100.0f32..1200.0,
            height in 100.0f32..900.0,
        ) {
            let field = Vec2::new(width, height);
            let mut player = Player::spawn(field);
            for (left, right, up, down) in moves {
                let input = TickInput { left, right, up, down, fire: false };
                player.update(&input, field);
                prop_assert!(player.pos.x >= 0.0 && player.pos.x <= width - player.size.x);
                prop_assert!(player.pos.y >= 0.0 && player.pos.y <= height - player.size.y);
                prop_assert!(crate::is_finite_vec(player.pos));
            }
        }

        #[test]
        fn particles_stay_finite(seed in any::<u64>(), steps in 0u32..40) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut particle = Particle::spawn(ParticleKind::Explosion, Vec2::new(400.0, 300.0), &mut rng);
            for _ in 0..steps {
                particle.update();
                prop_assert!(crate::is_finite_vec(particle.pos));
            }
        }
    }
}
