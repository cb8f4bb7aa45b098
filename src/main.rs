//! Stack Tower entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use stack_tower::consts::MAX_FRAME_DT_MS;
    use stack_tower::renderer::CanvasRenderer;
    use stack_tower::sim::{
        Autopilot, FrameInput, PlaceOutcome, PressFilter, PressSource, TowerState, frame,
    };
    use stack_tower::TowerConfig;

    /// Misalignment range the demo player aims within
    const AUTOPILOT_AIM_ERROR: f32 = 6.0;

    /// Game instance holding all state
    struct Game {
        state: TowerState,
        renderer: CanvasRenderer,
        input: FrameInput,
        presses: PressFilter,
        autopilot: Option<Autopilot>,
        last_time: f64,
    }

    impl Game {
        fn new(config: TowerConfig, renderer: CanvasRenderer) -> Self {
            Self {
                state: TowerState::new(config),
                renderer,
                input: FrameInput::default(),
                presses: PressFilter::default(),
                autopilot: None,
                last_time: 0.0,
            }
        }

        /// Apply buffered input and advance one frame
        fn update(&mut self, dt_ms: f32) {
            let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_DT_MS);

            if let Some(pilot) = self.autopilot.as_mut() {
                if pilot.wants_place(&self.state) {
                    self.input.place = true;
                }
            }

            let restarting = self.input.restart || (self.input.start && !self.state.is_active());
            let outcome = frame(&mut self.state, &self.input, dt_ms);
            self.input.clear();

            if restarting {
                self.renderer.reset_camera(&self.state);
            }

            match outcome {
                Some(PlaceOutcome::Hit { topped: true, score, .. }) => {
                    log::info!("Tower topped out with score {}", score);
                }
                Some(PlaceOutcome::Miss { score }) => {
                    log::info!("Run over with score {}", score);
                }
                _ => {}
            }
        }

        fn render(&mut self, dt_ms: f32) {
            self.renderer.render(&self.state, dt_ms);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("difficulty-label") {
                el.set_text_content(Some(self.state.difficulty.label()));
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                let classes = el.class_list();
                match self.state.final_score() {
                    Some(score) => {
                        let _ = classes.remove_1("hidden");
                        if let Some(final_el) = document.get_element_by_id("final-score") {
                            final_el.set_text_content(Some(&score.to_string()));
                        }
                    }
                    None => {
                        let _ = classes.add_1("hidden");
                    }
                }
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Stack Tower starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("tower")
            .ok_or_else(|| JsValue::from_str("missing #tower canvas"))?
            .dyn_into()?;
        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        let mut renderer = CanvasRenderer::new(canvas)?;
        renderer.resize(width, height);

        let game = Rc::new(RefCell::new(Game::new(TowerConfig::load(), renderer)));

        setup_input_handlers(&window, game.clone())?;
        setup_buttons(&document, game.clone())?;

        request_animation_frame(game);

        log::info!("Stack Tower running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        g.input.place = true;
                    }
                    "KeyI" => {
                        if g.autopilot.take().is_none() {
                            let seed = js_sys::Date::now() as u64;
                            g.autopilot = Some(Autopilot::new(seed, AUTOPILOT_AIM_ERROR));
                        }
                        log::info!("Idle mode: {}", g.autopilot.is_some());
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.presses.accept(PressSource::Mouse, event.time_stamp()) {
                    g.input.place = true;
                }
            });
            window.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch press
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Buttons handle their own (emulated) mousedown
                if is_on_button(&event) {
                    return;
                }
                event.prevent_default();
                let mut g = game.borrow_mut();
                if g.presses.accept(PressSource::Touch, event.time_stamp()) {
                    g.input.place = true;
                }
            });
            window.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn is_on_button(event: &TouchEvent) -> bool {
        event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("button").ok().flatten())
            .is_some()
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let bindings: [(&str, fn(&mut FrameInput)); 3] = [
            ("btn-start", |input| input.start = true),
            ("btn-restart", |input| input.restart = true),
            ("btn-difficulty", |input| input.toggle_difficulty = true),
        ];

        for (id, apply) in bindings {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Button #{} not found", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Button presses are not drops
                event.stop_propagation();
                apply(&mut game.borrow_mut().input);
            });
            btn.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

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
            let dt_ms = if g.last_time > 0.0 {
                (time - g.last_time) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt_ms);
            g.render(dt_ms);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Headless demo: the autopilot plays one run at a fixed frame rate
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use stack_tower::TowerConfig;
    use stack_tower::sim::{Autopilot, FrameInput, TowerState, frame};

    const FRAME_MS: f32 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    const AIM_ERROR: f32 = 6.0;

    env_logger::init();
    log::info!("Stack Tower (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => TowerConfig::load_from_path(std::path::Path::new(&path)),
        None => TowerConfig::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5eed_u64);

    let mut state = TowerState::new(config);
    let mut pilot = Autopilot::new(seed, AIM_ERROR);
    let mut input = FrameInput {
        start: true,
        ..Default::default()
    };

    let mut frames = 0;
    loop {
        input.place = pilot.wants_place(&state);
        frame(&mut state, &input, FRAME_MS);
        input.clear();
        frames += 1;
        if !state.is_active() || frames >= MAX_FRAMES {
            break;
        }
    }

    let top = state.previous();
    println!(
        "seed {}: score {} after {} frames ({:?}), top block {:.1} x {:.1}",
        seed,
        state.score,
        frames,
        state.end_reason(),
        top.width(),
        top.depth()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
