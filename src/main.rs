//! Bugger Blaster entry point
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

    use bugger_blaster::Tuning;
    use bugger_blaster::platform::{SetupError, assets, canvas_size};
    use bugger_blaster::renderer::{CanvasSurface, Sprite};
    use bugger_blaster::sim::{InputState, SimulationState, tick};

    /// Sprite decode reported by an image `load` event
    type SpriteLoad = (Sprite, f32, f32);

    /// Game instance holding all state
    struct Game {
        state: SimulationState,
        surface: CanvasSurface,
        input: InputState,
        // Browser events queue work here; it is applied at the start of the next frame
        loaded: Rc<RefCell<Vec<SpriteLoad>>>,
        pending_resize: Option<(u32, u32)>,
    }

    impl Game {
        /// Apply queued asset loads and resizes, then run one tick
        fn frame(&mut self) {
            for (sprite, w, h) in self.loaded.borrow_mut().drain(..) {
                self.state.on_sprite_loaded(sprite, w, h);
            }
            if let Some((w, h)) = self.pending_resize.take() {
                self.surface.resize(w, h);
                self.state.resize(w as f32, h as f32);
                log::info!("Canvas resized to {}x{}", w, h);
            }

            let input = self.input.take_frame();
            tick(&mut self.state, &input, &mut self.surface);
        }
    }

    fn window_canvas_size(window: &web_sys::Window) -> (u32, u32) {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        canvas_size(
            dimension(window.inner_width()),
            dimension(window.inner_height()),
        )
    }

    /// Tuning embedded in the page as `<script id="tuning" type="application/json">`
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Err(e) => {
                log::error!("Ignoring page tuning: {}", e);
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), SetupError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Bugger Blaster starting...");

        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| SetupError::MissingElement("canvas".into()))?
            .dyn_into()
            .map_err(|_| SetupError::WrongElementType("canvas".into()))?;

        let (width, height) = window_canvas_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);

        // Sprites report their natural size once decoded
        let loaded: Rc<RefCell<Vec<SpriteLoad>>> = Rc::new(RefCell::new(Vec::new()));
        let images = {
            let loaded = loaded.clone();
            assets::load_sprites(Rc::new(move |sprite: Sprite, w: f32, h: f32| {
                loaded.borrow_mut().push((sprite, w, h));
            }))?
        };
        let surface = CanvasSurface::new(&document, canvas, images)?;

        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning(&document);
        let viewport = glam::Vec2::new(width as f32, height as f32);
        let state = SimulationState::new(tuning, viewport, seed);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            surface,
            input: InputState::default(),
            loaded,
            pending_resize: None,
        }));

        setup_input_handlers(&window, game.clone())?;
        setup_resize_handler(&window, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Bugger Blaster running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), SetupError> {
        let document = window.document().ok_or(SetupError::NoDocument)?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(event.key_code()) {
                    event.prevent_default();
                }
            });
            document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .map_err(SetupError::from_js)?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_up(event.key_code()) {
                    event.prevent_default();
                }
            });
            document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
                .map_err(SetupError::from_js)?;
            closure.forget();
        }

        // Window blur: key ups for held keys will never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.release_all();
                log::info!("Input released (window blur)");
            });
            window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())
                .map_err(SetupError::from_js)?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize_handler(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), SetupError> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                game.borrow_mut().pending_resize = Some(window_canvas_size(&window));
            }
        });
        window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(SetupError::from_js)?;
        closure.forget();
        Ok(())
    }

    /// Schedule the next frame, falling back to a ~60 Hz timer
    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; frame loop stopped");
            return;
        };
        let closure = Closure::once(move |_time: JsValue| {
            game_loop(game);
        });
        let callback = closure.as_ref().unchecked_ref();
        if window.request_animation_frame(callback).is_err() {
            let interval = (1000 / bugger_blaster::consts::FRAMES_PER_SECOND) as i32;
            if window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback, interval)
                .is_err()
            {
                log::error!("Unable to schedule frame; loop stopped");
                return;
            }
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {}", e);
        wasm_bindgen::throw_str(&e.to_string());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bugger Blaster (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session against a recording surface
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use bugger_blaster::Tuning;
    use bugger_blaster::renderer::{RecordingSurface, Sprite};
    use bugger_blaster::sim::{Action, InputState, SimulationState, tick};
    use glam::Vec2;

    let (width, height) = bugger_blaster::platform::canvas_size(1280.0, 800.0);
    let mut surface = RecordingSurface::new(width as f32, height as f32);
    let viewport = Vec2::new(width as f32, height as f32);
    let mut state = SimulationState::new(Tuning::default(), viewport, 42);
    state.on_sprite_loaded(Sprite::Background1, 1920.0, height as f32);
    state.on_sprite_loaded(Sprite::Background2, 1920.0, height as f32);
    state.on_sprite_loaded(Sprite::Ship, 64.0, 40.0);

    let mut input = InputState::default();
    let code = |action: Action| action.key_code();

    for frame in 0..360u32 {
        match frame {
            1 => {
                input.key_down(code(Action::BuggerMode));
                input.key_down(code(Action::Fire));
            }
            2 => {
                input.key_up(code(Action::BuggerMode));
            }
            120 => {
                input.key_down(code(Action::Bomb));
            }
            121 => {
                input.key_up(code(Action::Bomb));
            }
            300 => {
                input.key_down(code(Action::ClearEnemies));
                input.key_up(code(Action::Fire));
            }
            _ => {}
        }

        let snapshot = input.take_frame();
        tick(&mut state, &snapshot, &mut surface);

        if frame % 60 == 0 {
            log::info!(
                "tick {:>3}: shots={} buggers={} particles={} bombing={}",
                state.time_ticks,
                state.shots.len(),
                state.buggers.len(),
                state.particles.len(),
                state.player.bombing
            );
        }
    }

    println!(
        "Headless demo finished: {} frames presented, {} buggers live",
        surface.presented,
        state.buggers.len()
    );
}
