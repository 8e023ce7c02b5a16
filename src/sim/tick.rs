//! Per-frame simulation step
//!
//! One call per rendered frame. Order: player, bullets, spawner, enemies,
//! particles, collisions, game-over check. Removals go through `retain` or
//! rebuild the collection, never through in-place removal while iterating.

use super::collision::intersects;
use super::state::{GameEvent, GamePhase, GameState};

/// Keys held during this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Advance the session by one frame
///
/// `dt_ms` only feeds the spawn timer; movement and timers are per step.
/// Does nothing unless the session is Playing.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Player
    state.player.update(input, state.field);
    if input.fire {
        if let Some(bullet) = state.player.shoot() {
            state.bullets.push(bullet);
            state.events.push(GameEvent::BulletFired);
        }
    }

    // Bullets
    for bullet in &mut state.bullets {
        bullet.update();
    }
    state.bullets.retain(|b| !b.is_off_screen());

    // Spawning
    if state.spawner.advance(dt_ms) {
        state.spawn_enemy();
    }

    // Enemies
    let field = state.field;
    for enemy in &mut state.enemies {
        enemy.update(field.x);
    }
    let events = &mut state.events;
    state.enemies.retain(|e| {
        let inside = e.pos.y <= field.y;
        if !inside {
            events.push(GameEvent::EnemyEscaped { id: e.id });
        }
        inside
    });

    // Particles
    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(|p| !p.is_dead());

    resolve_collisions(state);

    if state.is_out_of_lives() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over: score {} after {} steps",
            state.score,
            state.time_ticks
        );
    }
}

/// Bullet hits first, then ship collisions
pub fn resolve_collisions(state: &mut GameState) {
    resolve_bullet_hits(state);
    resolve_player_hits(state);
}

/// Each bullet damages the first live enemy it overlaps and is consumed
///
/// Enemies are checked in collection (spawn) order, so when one bullet
/// overlaps several enemies the oldest takes the hit.
fn resolve_bullet_hits(state: &mut GameState) {
    if state.bullets.is_empty() || state.enemies.is_empty() {
        return;
    }

    let bullets = std::mem::take(&mut state.bullets);
    let mut survivors = Vec::with_capacity(bullets.len());

    for bullet in bullets {
        let bullet_box = bullet.bounds();
        let target = state
            .enemies
            .iter()
            .position(|e| !e.is_destroyed() && intersects(&bullet_box, &e.bounds()));

        let Some(idx) = target else {
            survivors.push(bullet);
            continue;
        };

        let enemy = &mut state.enemies[idx];
        enemy.take_damage(1);
        let (id, kind, center) = (enemy.id, enemy.kind, enemy.center());
        let health = enemy.health;

        if enemy.is_destroyed() {
            let score_value = enemy.score_value();
            let explosion = enemy.explosion_size();
            state.score += score_value as u64;
            state.spawn_explosion(center, explosion);
            state.events.push(GameEvent::EnemyDestroyed {
                id,
                kind,
                score_value,
            });
        } else {
            state.spawn_hit_effect(center);
            state.events.push(GameEvent::EnemyDamaged { id, health });
        }
    }

    state.bullets = survivors;
    state.enemies.retain(|e| !e.is_destroyed());
}

/// Every enemy touching the ship explodes and costs lives
///
/// The post-hit flash is visual only; it does not make the ship immune.
fn resolve_player_hits(state: &mut GameState) {
    let player_box = state.player.bounds();
    let (crashed, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(|e| intersects(&player_box, &e.bounds()));
    state.enemies = remaining;

    for enemy in crashed {
        state.spawn_explosion(enemy.center(), enemy.explosion_size());
        let damage = enemy.damage_to_player();
        state.lives -= damage;
        state.player.hit();
        state.events.push(GameEvent::PlayerHit {
            damage,
            lives: state.lives,
        });
        log::debug!(
            "Player hit by {} enemy {} ({} lives left)",
            enemy.kind.as_str(),
            enemy.id,
            state.lives
        );
    }
}
