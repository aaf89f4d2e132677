//! Tower Defense entry point
//!
//! The browser build runs the interactive game; the native build plays a
//! headless session with the autoplayer and logs how it went.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent};

    use tower_defense::audio::{AudioManager, SoundEffect};
    use tower_defense::consts::*;
    use tower_defense::demo::AutoPlayer;
    use tower_defense::renderer::{RenderState, Viewport, build_scene};
    use tower_defense::sim::{GamePhase, GameState, TickInput, tick};
    use tower_defense::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        last_time: f64,
        input: TickInput,
        /// CSS size of the canvas, for mapping pointer positions
        css_viewport: Viewport,
        /// Autoplayer drives the input while set
        idle: Option<AutoPlayer>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Self {
                state: GameState::with_tuning(Tuning::default()),
                render_state: None,
                audio,
                settings,
                last_time: 0.0,
                input: TickInput::default(),
                css_viewport: Viewport::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                idle: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one simulation tick and play the sounds it produced
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(MAX_FRAME_DT);

            let mut input = self.input.clone();
            if let Some(player) = self.idle.as_mut() {
                let auto = player.next_input(&self.state);
                input.cursor = auto.cursor.or(input.cursor);
                input.place_tower = auto.place_tower;
            }
            tick(&mut self.state, &input, dt);

            // Clear one-shot inputs after processing
            self.input.place_tower = false;
            self.input.pause = false;

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let cursor = if self.idle.is_some() {
                None
            } else {
                self.input.cursor
            };
            let vertices = build_scene(&self.state, cursor, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            set_text(document, "#hud-money .hud-value", &format!("${}", self.state.money));
            set_text(document, "#hud-lives .hud-value", &self.state.lives.to_string());
            set_text(document, "#hud-wave .hud-value", &self.state.wave.to_string());
            set_text(
                document,
                "#hud-hint",
                &format!("Left click to place tower (${})", self.state.tuning.tower_cost),
            );

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    set_text(document, "#hud-fps .hud-value", &self.fps.to_string());
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("idle-badge") {
                let class = if self.idle.is_some() { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            // Show/hide pause menu
            if let Some(el) = document.get_element_by_id("pause-menu") {
                let class = if self.state.phase == GamePhase::Paused {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }
        }

        /// Start over with the same balance values
        fn restart(&mut self) {
            let tuning = self.state.tuning.clone();
            self.state = GameState::with_tuning(tuning);
            self.input = TickInput {
                cursor: self.input.cursor,
                ..Default::default()
            };
            log::info!("Game restarted");
        }

        fn toggle_idle(&mut self) {
            self.idle = match self.idle {
                Some(_) => None,
                None => Some(AutoPlayer::new(js_sys::Date::now() as u64)),
            };
            log::info!("Idle mode: {}", self.idle.is_some());
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.apply_settings(&self.settings);
            self.settings.save();
        }

        fn adjust_volume(&mut self, delta: f32) {
            self.settings.adjust_master_volume(delta);
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            log::info!("Master volume: {:.1}", self.settings.master_volume);
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Tower Defense starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new(Settings::load())));
        game.borrow_mut().css_viewport = Viewport::new(client_w as f32, client_h as f32);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(game.clone());
        setup_resize(&canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Tower Defense running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - canvas CSS pixels to world units
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let px = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                let world = g.css_viewport.screen_to_world(px);
                g.input.cursor = Some(world);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer leaves the canvas: no preview
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.cursor = None;
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Left click places a tower
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let mut g = game.borrow_mut();
                let px = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                let world = g.css_viewport.screen_to_world(px);
                g.input.cursor = Some(world);
                g.input.place_tower = true;
                // Browsers only allow audio after a user gesture
                g.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else { return };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "Escape" | "p" | "P" => g.input.pause = true,
                    "r" | "R" => g.restart(),
                    "i" | "I" => g.toggle_idle(),
                    "m" | "M" => g.toggle_mute(),
                    "f" | "F" => {
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    "g" | "G" => {
                        g.settings.show_range_rings = !g.settings.show_range_rings;
                        g.settings.save();
                    }
                    "v" | "V" => {
                        g.settings.show_placement_preview = !g.settings.show_placement_preview;
                        g.settings.save();
                    }
                    "[" => g.adjust_volume(-Settings::VOLUME_STEP),
                    "]" => g.adjust_volume(Settings::VOLUME_STEP),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pause = true; // Toggle back to playing
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing && g.idle.is_none() {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else { return };
            let dpr = window.device_pixel_ratio();
            let client_w = canvas.client_width();
            let client_h = canvas.client_height();
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            g.css_viewport = Viewport::new(client_w as f32, client_h as f32);
            if let Some(rs) = g.render_state.as_mut() {
                rs.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
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
                1.0 / TARGET_FPS as f32
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

/// Seed for the native autoplayer
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_SEED: u64 = 0x7d_5eed;

/// Simulated length of the native session
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_SECONDS: u32 = 90;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use tower_defense::Tuning;
    use tower_defense::demo::run_headless;

    env_logger::init();
    log::info!("Tower Defense (native) starting...");
    log::info!("Interactive play needs the web build - run with `trunk serve`");

    // Optional balance file as the first argument
    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    log::info!("Headless run: {HEADLESS_SECONDS}s with autoplayer (seed {HEADLESS_SEED:#x})");
    let summary = run_headless(tuning, HEADLESS_SEED, HEADLESS_SECONDS);
    log::info!(
        "Finished after {} frames: money={} lives={} towers={} shots={} hits={} kills={} leaks={}",
        summary.frames,
        summary.money,
        summary.lives,
        summary.towers_built,
        summary.shots,
        summary.hits,
        summary.kills,
        summary.leaks,
    );

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
