//! Scene description for 2D primitives
//!
//! Turns a `GameState` into a flat list of drawables, back to front. The
//! list is plain data so any painter (canvas, tests, a JSON dump) can use it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::STAR_COUNT;
use crate::sim::{Enemy, EnemyKind, GameState, Particle, ParticleKind, Player};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const SHIP: Color = Color::rgb(0x00, 0xd4, 0xff);
    pub const BULLET: Color = Color::rgb(0xff, 0xff, 0x00);
    pub const FAST: Color = Color::rgb(0xff, 0x88, 0x00);

    /// CSS `rgba()` string
    pub fn to_css(&self, alpha: f32) -> String {
        if alpha >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                alpha.max(0.0)
            )
        }
    }
}

const EXPLOSION_PALETTE: [Color; 4] = [
    Color::rgb(0xff, 0x66, 0x00),
    Color::rgb(0xff, 0x99, 0x00),
    Color::rgb(0xff, 0xcc, 0x00),
    Color::rgb(0xff, 0x33, 0x00),
];

const HIT_PALETTE: [Color; 2] = [Color::rgb(0xff, 0xff, 0x00), Color::WHITE];

/// Colors a particle flickers between
pub fn particle_palette(kind: ParticleKind) -> &'static [Color] {
    match kind {
        ParticleKind::Explosion => &EXPLOSION_PALETTE,
        ParticleKind::Hit => &HIT_PALETTE,
    }
}

/// What a drawable depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawKind {
    Star,
    Player,
    Bullet,
    Enemy(EnemyKind),
    Particle(ParticleKind),
}

/// Per-kind detail painted over the body rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Decal {
    None,
    /// Nested squares of the player ship
    Ship,
    /// Inset white square with a colored core
    Core,
    /// White arrowhead of the Fast enemy
    Arrow,
    /// Core plus four grey corner plates
    Armor,
    /// Core plus two rows of dots
    Zigzag,
}

/// One thing to paint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub kind: DrawKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub alpha: f32,
    pub decal: Decal,
    /// Fill of the health bar, only for enemies with more than one hit point
    pub health_bar: Option<f32>,
}

impl Drawable {
    fn rect(kind: DrawKind, pos: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            kind,
            pos,
            size,
            color,
            alpha: 1.0,
            decal: Decal::None,
            health_bar: None,
        }
    }
}

/// Build the full scene for the current state
pub fn build_scene(state: &GameState) -> Vec<Drawable> {
    let mut scene = Vec::with_capacity(
        STAR_COUNT as usize
            + 1
            + state.bullets.len()
            + state.enemies.len()
            + state.particles.len(),
    );

    scene.extend(starfield(state.field));
    scene.extend(player(&state.player));
    scene.extend(state.bullets.iter().map(|b| {
        Drawable::rect(DrawKind::Bullet, b.pos, b.size, Color::BULLET)
    }));
    scene.extend(state.enemies.iter().map(enemy));
    scene.extend(state.particles.iter().map(particle));

    scene
}

/// Fixed background stars, one pixel each
pub fn starfield(field: Vec2) -> impl Iterator<Item = Drawable> {
    let w = field.x.max(1.0) as u32;
    let h = field.y.max(1.0) as u32;
    (0..STAR_COUNT).map(move |i| {
        let pos = Vec2::new(((i * 37) % w) as f32, ((i * 47) % h) as f32);
        Drawable::rect(DrawKind::Star, pos, Vec2::ONE, Color::WHITE)
    })
}

/// The ship, or nothing on the dark blocks of the hit flash
pub fn player(player: &Player) -> Option<Drawable> {
    if !player.is_visible() {
        return None;
    }
    let mut d = Drawable::rect(DrawKind::Player, player.pos, player.size, Color::SHIP);
    d.decal = Decal::Ship;
    Some(d)
}

/// White at full health, shading to pure red as health drops (Fast keeps its orange)
pub fn enemy_color(enemy: &Enemy) -> Color {
    match enemy.kind {
        EnemyKind::Fast => Color::FAST,
        _ => {
            let intensity = (255.0 * enemy.health_ratio()).floor() as u8;
            Color::rgb(255, intensity, intensity)
        }
    }
}

pub fn enemy(enemy: &Enemy) -> Drawable {
    let mut d = Drawable::rect(
        DrawKind::Enemy(enemy.kind),
        enemy.pos,
        enemy.size,
        enemy_color(enemy),
    );
    d.decal = match enemy.kind {
        EnemyKind::Basic => Decal::Core,
        EnemyKind::Fast => Decal::Arrow,
        EnemyKind::Tank => Decal::Armor,
        EnemyKind::Zigzag => Decal::Zigzag,
    };
    if enemy.max_health > 1 {
        d.health_bar = Some(enemy.health_ratio());
    }
    d
}

pub fn particle(particle: &Particle) -> Drawable {
    let palette = particle_palette(particle.kind);
    let color = palette[particle.life as usize % palette.len()];
    let mut d = Drawable::rect(
        DrawKind::Particle(particle.kind),
        particle.pos,
        Vec2::splat(particle.size),
        color,
    );
    d.alpha = particle.life_fraction();
    d
}
