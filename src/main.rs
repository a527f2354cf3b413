//! Coin Jump entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use coin_jump::Settings;
    use coin_jump::audio::AudioManager;
    use coin_jump::consts::*;
    use coin_jump::platform::{KeyAction, action_for_code, assets};
    use coin_jump::renderer::{RenderState, build_frame};
    use coin_jump::sim::{GameEvent, GamePhase, GameState, InputState, StepClock, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        clock: StepClock,
        render_state: Option<RenderState>,
        audio: AudioManager,
        last_time: f64,
        /// Wall clock in seconds, as of the last frame
        now: f64,
    }

    impl Game {
        fn new(settings: &Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_muted(settings.muted);

            Self {
                state: GameState::new(),
                input: InputState::default(),
                clock: StepClock::new(settings.step_mode),
                render_state: None,
                audio,
                last_time: 0.0,
                now: 0.0,
            }
        }

        /// Run simulation steps for one animation frame
        fn update(&mut self, dt: f32) {
            let steps = self.clock.steps_for(dt);
            for _ in 0..steps {
                tick(&mut self.state, &self.input, self.now);
            }
            self.dispatch_events();
        }

        /// Forward simulation events to audio and the log
        fn dispatch_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::LevelStarted(level) => {
                        log::debug!("Level {} started", level.number())
                    }
                    GameEvent::Jumped => {}
                    other => log::info!("{:?}", other),
                }
                self.audio.on_event(&event);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_frame(&self.state);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-level") {
                el.set_text_content(Some(&format!("Level: {}", self.state.level.number())));
            }

            let show = |id: &str, base: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let class = if visible {
                        base.to_string()
                    } else {
                        format!("{base} hidden")
                    };
                    let _ = el.set_attribute("class", class.trim());
                }
            };
            let phase = self.state.phase;
            show("lost-overlay", "overlay", phase == GamePhase::Lost);
            show("finished-overlay", "overlay", phase == GamePhase::Finished);
            show("restart-btn", "", phase == GamePhase::Finished);
        }

        fn key_down(&mut self, action: KeyAction) {
            self.audio.resume();
            match action {
                KeyAction::Move(dir) => self.state.key_down(&mut self.input, dir),
                KeyAction::RestartLevel => {
                    log::info!("Level restart requested");
                    self.state.restart_level();
                }
            }
            self.dispatch_events();
        }

        fn key_up(&mut self, action: KeyAction) {
            if let KeyAction::Move(dir) = action {
                self.state.key_up(&mut self.input, dir);
            }
        }

        /// Full reset to level one
        fn reset(&mut self) {
            self.state.reset_game();
            self.input.clear();
            self.clock.reset();
            self.dispatch_events();
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!(
            "Coin Jump starting at {}",
            String::from(js_sys::Date::new_0().to_iso_string())
        );

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store matches the world's aspect ratio
        let dpr = window.device_pixel_ratio();
        let width = (WORLD_WIDTH as f64 * dpr) as u32;
        let height = (WORLD_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        if settings.background_image {
            assets::probe_background(&canvas, "fondo.gif");
        }

        let game = Rc::new(RefCell::new(Game::new(&settings)));
        log::info!("Step mode: {:?}", settings.step_mode);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone())?;
        setup_restart_button(game.clone());
        setup_focus_handler(game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Coin Jump running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(action) = action_for_code(&event.code()) else {
                    return;
                };
                // Keep arrows from scrolling the page
                event.prevent_default();
                if event.repeat() {
                    return;
                }
                game.borrow_mut().key_down(action);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = action_for_code(&event.code()) {
                    game.borrow_mut().key_up(action);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().reset();
                log::info!("Game restarted from button");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #restart-btn element, reset only available by reload");
        }
    }

    /// Drop held keys when the window loses focus; their keyup never arrives
    fn setup_focus_handler(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            game.borrow_mut().input.clear();
            log::info!("Input released (window blur)");
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;
            g.now = time / 1000.0;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Coin Jump (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let finished = headless_run();
    if finished {
        println!("✓ Headless run collected both coins");
    } else {
        println!("✗ Headless run did not finish");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play both levels with a scripted runner: hold right, jump at gaps.
#[cfg(not(target_arch = "wasm32"))]
fn headless_run() -> bool {
    use coin_jump::consts::SIM_DT;
    use coin_jump::sim::{
        Direction, GamePhase, GameState, InputState, horizontal_overlap, tick,
    };

    let mut state = GameState::new();
    let mut input = InputState::default();
    state.key_down(&mut input, Direction::Right);

    for frame in 0..3000u32 {
        let now = frame as f64 * SIM_DT as f64;

        // Release the jump key one frame after pressing it
        if input.up {
            state.key_up(&mut input, Direction::Up);
        }

        let player = &state.player;
        let look_ahead = player.pos.x + player.speed * 4.0;
        let gap_ahead = !state
            .platforms
            .iter()
            .any(|p| horizontal_overlap(look_ahead, p));
        if player.grounded && gap_ahead {
            state.key_down(&mut input, Direction::Up);
        }

        tick(&mut state, &input, now);

        for event in state.drain_events() {
            log::info!("frame {}: {:?}", frame, event);
        }

        if state.phase == GamePhase::Finished {
            log::info!("Finished after {} frames", frame + 1);
            return true;
        }
    }
    false
}
