//! Bull Chase entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent};

    use bull_chase::consts::*;
    use bull_chase::platform::{PointerEvent, PointerState};
    use bull_chase::renderer::CanvasRenderer;
    use bull_chase::sim::{SceneState, tick};
    use bull_chase::{SceneTuning, Settings};

    /// Game instance holding all state
    struct Game {
        state: SceneState,
        settings: Settings,
        pointer: PointerState,
        renderer: Option<CanvasRenderer>,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, tuning: SceneTuning) -> Self {
            let pointer = PointerState::new(tuning.center());
            Self {
                state: SceneState::new(seed, tuning),
                settings: Settings::load(),
                pointer,
                renderer: None,
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.pointer.tick_input();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            // Drop time we could not catch up on
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                renderer.render(&self.state, &self.pointer, &self.settings);
            }
        }

        /// Reset the scene for a new layout
        fn restart(&mut self, seed: u64) {
            self.state.restart(seed);
            self.pointer = PointerState::new(self.state.tuning.center());
            self.accumulator = 0.0;
            log::info!(
                "Scene restarted with seed {} ({} obstacles)",
                seed,
                self.state.obstacles.len()
            );
        }
    }

    /// Tuning from an inline `<script id="tuning" type="application/json">`,
    /// or defaults
    fn load_tuning(document: &web_sys::Document) -> SceneTuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return SceneTuning::default();
        };

        match SceneTuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded scene tuning");
                tuning
            }
            Err(e) => {
                log::warn!("Bad scene tuning, using defaults: {}", e);
                SceneTuning::default()
            }
        }
    }

    /// Fetch an `<img>` by id and wait until it is decoded
    async fn sprite_sheet(document: &web_sys::Document, id: &str) -> Result<HtmlImageElement, JsValue> {
        let image: HtmlImageElement = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no #{id} image")))?
            .dyn_into()?;
        JsFuture::from(image.decode()).await?;
        Ok(image)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bull Chase starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas1")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let tuning = load_tuning(&document);
        canvas.set_width(tuning.width as u32);
        canvas.set_height(tuning.height as u32);

        let bull = sprite_sheet(&document, "bull").await?;
        let obstacles = sprite_sheet(&document, "obstacles").await?;

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, tuning);
        game.renderer = Some(CanvasRenderer::new(&canvas, bull, obstacles)?);
        log::info!(
            "Scene initialized with seed {} ({} obstacles)",
            seed,
            game.state.obstacles.len()
        );

        let game = Rc::new(RefCell::new(game));
        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Bull Chase running!");
        Ok(())
    }

    /// Mouse offset in canvas pixels (the canvas may be scaled by CSS)
    fn canvas_pos(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
        let sx = canvas.width() as f32 / canvas.client_width().max(1) as f32;
        let sy = canvas.height() as f32 / canvas.client_height().max(1) as f32;
        Vec2::new(event.offset_x() as f32 * sx, event.offset_y() as f32 * sy)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer
        let pointer_events: [(&str, fn(Vec2) -> PointerEvent); 3] = [
            ("mousedown", PointerEvent::Down),
            ("mouseup", PointerEvent::Up),
            ("mousemove", PointerEvent::Move),
        ];
        for (name, to_event) in pointer_events {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = canvas_pos(&canvas_clone, &event);
                game.borrow_mut().pointer.handle(to_event(pos));
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "d" | "D" => {
                        let on = g.settings.toggle_debug_overlay();
                        g.settings.save();
                        log::info!("Debug overlay: {}", on);
                    }
                    "r" | "R" => {
                        let seed = js_sys::Date::now() as u64;
                        g.restart(seed);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Bull Chase failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bull_chase::SceneTuning;
    use bull_chase::platform::{PointerEvent, PointerState};
    use bull_chase::sim::{SceneState, tick};
    use glam::Vec2;

    env_logger::init();
    log::info!("Bull Chase (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    let tuning = SceneTuning::default();
    let mut pointer = PointerState::new(tuning.center());
    let mut state = SceneState::new(seed, tuning);

    println!("Seed {}: {} obstacles", seed, state.obstacles.len());
    for o in &state.obstacles {
        println!(
            "  #{} at ({:.1}, {:.1}) r={}",
            o.id, o.body.center.x, o.body.center.y, o.body.radius
        );
    }

    // Drag the pointer to each corner of the playfield in turn
    let (min, max) = state.tuning.player_bounds();
    let corners = [
        Vec2::new(min.x, min.y),
        Vec2::new(max.x, min.y),
        Vec2::new(max.x, max.y),
        Vec2::new(min.x, max.y),
    ];
    for corner in corners {
        pointer.handle(PointerEvent::Down(corner));
        pointer.handle(PointerEvent::Up(corner));
        let mut contacts = 0;
        for _ in 0..600 {
            tick(&mut state, &pointer.tick_input());
            contacts += state.contacts;
        }
        let p = state.player.pos();
        println!(
            "Chased ({:.0}, {:.0}): bull at ({:.1}, {:.1}) facing {:?}, {} pushes",
            corner.x, corner.y, p.x, p.y, state.player.facing, contacts
        );
    }
}
