//! Star Strike entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use star_strike::renderer::canvas;
    use star_strike::sim::{GameEvent, GamePhase, TickInput};
    use star_strike::{Config, Game};

    /// Game instance holding all browser-side state
    struct Host {
        game: Game,
        ctx: CanvasRenderingContext2d,
        document: Document,
        input: TickInput,
        size: (f64, f64),
        last_phase: GamePhase,
    }

    impl Host {
        fn frame(&mut self, time: f64) {
            let frame = match self.game.frame(time, &self.input) {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Frame skipped: {}", e);
                    return;
                }
            };

            canvas::paint(&self.ctx, &frame, self.size.0, self.size.1);

            let hud_changed = frame.events.iter().any(GameEvent::refreshes_hud);
            if hud_changed || frame.phase != self.last_phase {
                self.update_hud(frame.score, frame.lives);
            }
            if frame.phase != self.last_phase {
                self.show_game_over(frame.phase == GamePhase::GameOver, frame.score);
                self.last_phase = frame.phase;
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, score: u64, lives: i32) {
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&score.to_string()));
            }
            if let Some(el) = self.document.get_element_by_id("lives") {
                el.set_text_content(Some(&lives.max(0).to_string()));
            }
        }

        fn show_game_over(&self, visible: bool, score: u64) {
            if visible {
                if let Some(el) = self.document.get_element_by_id("finalScore") {
                    el.set_text_content(Some(&score.to_string()));
                }
            }
            if let Some(el) = self.document.get_element_by_id("gameOver") {
                let classes = el.class_list();
                let _ = if visible {
                    classes.remove_1("hidden")
                } else {
                    classes.add_1("hidden")
                };
            }
        }

        fn set_key(&mut self, code: &str, held: bool) -> bool {
            match code {
                "ArrowLeft" => self.input.left = held,
                "ArrowRight" => self.input.right = held,
                "ArrowUp" => self.input.up = held,
                "ArrowDown" => self.input.down = held,
                "Space" => self.input.fire = held,
                _ => return false,
            }
            true
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Star Strike starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("missing #gameCanvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let size = (canvas.width() as f64, canvas.height() as f64);
        let config = Config {
            field_width: size.0 as f32,
            field_height: size.1 as f32,
            ..Default::default()
        }
        .with_seed(js_sys::Date::now() as u64);
        let game = Game::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let host = Rc::new(RefCell::new(Host {
            game,
            ctx,
            document: document.clone(),
            input: TickInput::default(),
            size,
            last_phase: GamePhase::Menu,
        }));
        host.borrow().update_hud(0, host.borrow().game.state().lives);

        setup_keyboard(&window, host.clone())?;
        setup_buttons(&document, host.clone())?;
        setup_auto_pause(&window, host.clone())?;

        request_animation_frame(host);
        log::info!("Star Strike running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if host.borrow_mut().set_key(&event.code(), true) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                host.borrow_mut().set_key(&event.code(), false);
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_buttons(document: &Document, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let actions: [(&str, fn(&mut Game)); 4] = [
            ("startBtn", Game::start),
            ("pauseBtn", Game::toggle_pause),
            ("restartBtn", Game::restart),
            ("playAgainBtn", Game::restart),
        ];

        for (id, action) in actions {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Button #{} not found", id);
                continue;
            };
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                action(&mut host.borrow_mut().game);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// Pause when the window loses focus
    fn setup_auto_pause(window: &web_sys::Window, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut h = host.borrow_mut();
            h.input = TickInput::default();
            if h.game.phase() == GamePhase::Playing {
                h.game.toggle_pause();
                log::info!("Auto-paused (window blur)");
            }
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        host.borrow_mut().frame(time);
        request_animation_frame(host);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Star Strike (native) starting...");
    log::info!("Native mode runs a headless autopilot session - serve the wasm build to play");

    if let Err(e) = run_headless() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one seeded session with a simple autopilot and report the result
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> Result<(), star_strike::GameError> {
    use star_strike::sim::{GamePhase, TickInput};
    use star_strike::{Config, Game};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let mut game = Game::new(config)?;
    game.start();

    let mut frames = 0;
    while frames < MAX_FRAMES && game.phase() == GamePhase::Playing {
        // Chase the lowest enemy horizontally, fire constantly
        let state = game.state();
        let ship_x = state.player.bounds().center().x;
        let target = state
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.center().x);
        let input = TickInput {
            left: target.is_some_and(|x| x < ship_x - 2.0),
            right: target.is_some_and(|x| x > ship_x + 2.0),
            fire: true,
            ..Default::default()
        };

        game.frame(frames as f64 * FRAME_MS, &input)?;
        frames += 1;
    }

    let state = game.state();
    log::info!(
        "Headless run finished after {} frames: phase={} score={} lives={}",
        frames,
        state.phase.as_str(),
        state.score,
        state.lives
    );
    println!("score {} lives {} frames {}", state.score, state.lives, frames);
    Ok(())
}
