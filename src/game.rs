//! Frame driver
//!
//! The host calls [`Game::frame`] once per animation frame with a monotonic
//! timestamp and the keys currently held. The driver turns timestamps into
//! deltas, runs one simulation step while the session is Playing, and hands
//! back everything the page needs to draw.

use serde::Serialize;

use crate::config::Config;
use crate::error::GameError;
use crate::renderer::shapes::{Drawable, build_scene};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Derives frame deltas from host timestamps
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_delta_ms: f64,
}

impl FrameClock {
    pub fn new(max_delta_ms: f64) -> Self {
        Self {
            last_ms: None,
            max_delta_ms,
        }
    }

    /// Forget the previous timestamp; the next frame gets a zero delta
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Milliseconds since the previous frame, clamped to the configured max
    ///
    /// The first frame after a reset yields 0. Non-finite or backwards
    /// timestamps are rejected and leave the clock untouched.
    pub fn delta(&mut self, now_ms: f64) -> Result<f32, GameError> {
        let invalid = GameError::InvalidTimestamp {
            now_ms,
            last_ms: self.last_ms,
        };
        if !now_ms.is_finite() {
            return Err(invalid);
        }
        let dt = match self.last_ms {
            Some(last) if now_ms < last => return Err(invalid),
            Some(last) => (now_ms - last).min(self.max_delta_ms),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        Ok(dt as f32)
    }
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameOutput {
    pub drawables: Vec<Drawable>,
    pub score: u64,
    pub lives: i32,
    pub phase: GamePhase,
    /// Debug overlay: enemies on the field
    pub enemy_count: usize,
    /// Debug overlay: spawn accumulator (ms)
    pub spawn_timer_ms: f32,
    /// Events raised since the previous frame
    pub events: Vec<GameEvent>,
}

/// A running game: session state plus frame timing
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    clock: FrameClock,
}

impl Game {
    /// Validate the config and open a session on the menu screen
    pub fn new(config: Config) -> Result<Self, GameError> {
        config.validate()?;
        log::info!(
            "New game: field {}x{}, seed {}",
            config.field_width,
            config.field_height,
            config.seed
        );
        Ok(Self {
            clock: FrameClock::new(config.max_frame_delta_ms),
            state: GameState::new(&config),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for scripted setups and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn start(&mut self) {
        self.state.start();
        self.clock.reset();
    }

    /// Pause or resume; time spent paused never reaches the simulation
    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
        self.clock.reset();
    }

    pub fn restart(&mut self) {
        self.state.restart();
        self.clock.reset();
    }

    /// Run one frame
    ///
    /// Outside the Playing phase nothing advances and the timestamp is not
    /// even inspected, but a full frame is still returned for the overlays.
    pub fn frame(&mut self, now_ms: f64, input: &TickInput) -> Result<FrameOutput, GameError> {
        if self.state.phase == GamePhase::Playing {
            let dt = self.clock.delta(now_ms).inspect_err(|e| {
                log::warn!("Rejected frame: {}", e);
            })?;
            tick(&mut self.state, input, dt);
        }
        Ok(self.output())
    }

    /// Snapshot for the presentation layer; drains pending events
    pub fn output(&mut self) -> FrameOutput {
        FrameOutput {
            drawables: build_scene(&self.state),
            score: self.state.score,
            lives: self.state.lives,
            phase: self.state.phase,
            enemy_count: self.state.enemies.len(),
            spawn_timer_ms: self.state.spawner.accumulator_ms,
            events: self.state.drain_events(),
        }
    }
}
