//! Session state and phase transitions
//!
//! Everything that changes while a session runs lives in `GameState`.
//! Restart throws all of it away and builds it again from the config.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use super::entity::{Bullet, Particle, ParticleKind, Player, emit_particles};
use super::spawner::{Spawner, spawn_enemy};
use crate::config::Config;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for Start
    Menu,
    /// Active gameplay
    Playing,
    /// Steps are not run
    Paused,
    /// Lives ran out; only a restart leaves this phase
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// Things that happened during a step, for the HUD and logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32, kind: EnemyKind },
    BulletFired,
    EnemyDamaged { id: u32, health: i32 },
    EnemyDestroyed { id: u32, kind: EnemyKind, score_value: u32 },
    /// Left through the bottom edge, unscored
    EnemyEscaped { id: u32 },
    PlayerHit { damage: i32, lives: i32 },
    GameOver { score: u64 },
    /// Fresh session built by restart; score and lives are back to their start values
    SessionRestarted { seed: u64 },
}

impl GameEvent {
    /// Score or lives may differ from what the HUD last showed
    pub fn refreshes_hud(&self) -> bool {
        matches!(
            self,
            GameEvent::EnemyDestroyed { .. }
                | GameEvent::PlayerHit { .. }
                | GameEvent::SessionRestarted { .. }
        )
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the current session was built from
    pub seed: u64,
    pub rng: Pcg32,
    /// Playfield size
    pub field: Vec2,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: i32,
    pub level: u32,
    /// Simulation steps run this session
    pub time_ticks: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub spawner: Spawner,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    config: Config,
    next_id: u32,
}

impl GameState {
    /// Fresh session in the Menu phase
    ///
    /// `config` is expected to have passed [`Config::validate`].
    pub fn new(config: &Config) -> Self {
        Self::build(config.clone(), config.seed)
    }

    fn build(config: Config, seed: u64) -> Self {
        let field = config.field();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            phase: GamePhase::Menu,
            score: 0,
            lives: config.starting_lives,
            level: config.starting_level,
            time_ticks: 0,
            player: Player::spawn(field),
            bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            spawner: Spawner::new(config.spawn_tuning()),
            events: Vec::new(),
            config,
            next_id: 1,
        }
    }

    /// Menu -> Playing
    pub fn start(&mut self) {
        if self.phase != GamePhase::Menu {
            log::debug!("Start ignored in phase {}", self.phase.as_str());
            return;
        }
        self.phase = GamePhase::Playing;
        self.spawner.reset_timer();
        if self.config.spawn_on_start {
            self.spawn_enemy();
        }
        log::info!("Session started (seed {})", self.seed);
    }

    /// Playing <-> Paused; other phases are left alone
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            _ => log::debug!("Pause toggle ignored in phase {}", self.phase.as_str()),
        }
    }

    /// Discard the session and start a new one in the Playing phase
    ///
    /// The new seed is drawn from the old RNG, so a run of restarts is still
    /// reproducible from the first seed.
    pub fn restart(&mut self) {
        let seed = self.rng.next_u64();
        *self = Self::build(self.config.clone(), seed);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::SessionRestarted { seed });
        log::info!("Session restarted (seed {})", seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Roll and add one enemy above the top edge
    pub fn spawn_enemy(&mut self) -> u32 {
        let id = self.next_entity_id();
        let enemy = spawn_enemy(&mut self.rng, id, self.field.x, self.level);
        log::debug!(
            "Spawned {} enemy {} at x={:.1} speed={:.2} ({} on field)",
            enemy.kind.as_str(),
            id,
            enemy.pos.x,
            enemy.speed,
            self.enemies.len() + 1
        );
        self.events.push(GameEvent::EnemySpawned {
            id,
            kind: enemy.kind,
        });
        self.enemies.push(enemy);
        id
    }

    /// Add a specific enemy at a specific spot (scripted waves, tests)
    pub fn spawn_enemy_at(&mut self, kind: EnemyKind, pos: Vec2, base_speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, kind, pos, base_speed));
        self.events.push(GameEvent::EnemySpawned { id, kind });
        id
    }

    /// Death burst of `count` particles
    pub fn spawn_explosion(&mut self, center: Vec2, count: u32) {
        emit_particles(
            &mut self.particles,
            &mut self.rng,
            ParticleKind::Explosion,
            center,
            count,
        );
    }

    /// Small spark burst for a non-lethal hit
    pub fn spawn_hit_effect(&mut self, center: Vec2) {
        emit_particles(
            &mut self.particles,
            &mut self.rng,
            ParticleKind::Hit,
            center,
            HIT_PARTICLES,
        );
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Lives are gone
    pub fn is_out_of_lives(&self) -> bool {
        self.lives <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(&Config::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.enemies.is_empty());
        assert_eq!(state.spawner.delay_ms, 1000.0);
    }

    #[test]
    fn test_start_spawns_first_enemy() {
        let mut state = GameState::new(&Config::default());
        state.start();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies.len(), 1);

        // Second start is a no-op
        state.start();
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_start_without_initial_spawn() {
        let config = Config {
            spawn_on_start: false,
            ..Default::default()
        };
        let mut state = GameState::new(&config);
        state.start();
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = GameState::new(&Config::default());
        // Not playing yet
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Menu);

        state.start();
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Playing);

        state.phase = GamePhase::GameOver;
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(&Config::default());
        state.start();
        state.score = 120;
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        state.spawner.delay_ms = 600.0;
        state.bullets.push(Bullet::new(Vec2::new(10.0, 10.0)));
        state.spawn_explosion(Vec2::ZERO, 10);
        state.player.hit();

        let old_seed = state.seed;
        state.restart();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.spawner.delay_ms, 1000.0);
        assert_eq!(state.player.hit_timer, 0);
        assert_ne!(state.seed, old_seed);
    }

    #[test]
    fn test_restart_signals_hud_refresh() {
        let mut state = GameState::new(&Config::default());
        state.start();
        state.score = 120;
        state.lives = 2;
        state.drain_events();

        state.restart();

        let events = state.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::SessionRestarted { seed: state.seed }]
        );
        assert!(events.iter().any(GameEvent::refreshes_hud));
        assert!(!GameEvent::BulletFired.refreshes_hud());
    }

    #[test]
    fn test_restart_is_reproducible() {
        let mut a = GameState::new(&Config::default());
        let mut b = GameState::new(&Config::default());
        a.restart();
        b.restart();
        assert_eq!(a.seed, b.seed);
        a.spawn_enemy();
        b.spawn_enemy();
        assert_eq!(a.enemies, b.enemies);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(&Config::default());
        let first = state.spawn_enemy();
        let second = state.spawn_enemy_at(EnemyKind::Tank, Vec2::ZERO, 1.0);
        assert!(second > first);
        assert_eq!(state.drain_events().len(), 2);
        assert!(state.events.is_empty());
    }
}
