//! Streamy entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use streamy::platform::LocalStore;
    use streamy::renderer::{RenderState, compose};
    use streamy::ui::DomUi;
    use streamy::{App, Tuning};

    /// Game instance holding all state
    struct Game {
        app: App<LocalStore, DomUi>,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Match the canvas backing store to the viewport and device pixel ratio
        fn fit_canvas(&mut self) {
            let Some(viewport) = Viewport::current() else {
                return;
            };
            viewport.apply(&self.canvas);
            self.app.resize(viewport.width, viewport.height);
            if let Some(render_state) = &mut self.render_state {
                render_state.resize(viewport.physical_size(), (viewport.width, viewport.height));
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let frame = compose(&self.app.state);
            if let Some(render_state) = &mut self.render_state {
                match render_state.render(&frame.vertices) {
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
            self.app.ui_mut().apply_hud(&frame.hud);
        }
    }

    /// Viewport in CSS pixels plus the device pixel ratio
    struct Viewport {
        width: f32,
        height: f32,
        dpr: f64,
    }

    impl Viewport {
        fn current() -> Option<Self> {
            let window = web_sys::window()?;
            let width = window.inner_width().ok()?.as_f64()?;
            let height = window.inner_height().ok()?.as_f64()?;
            Some(Self {
                width: width as f32,
                height: height as f32,
                dpr: window.device_pixel_ratio(),
            })
        }

        fn physical_size(&self) -> (u32, u32) {
            (
                (self.width as f64 * self.dpr).floor() as u32,
                (self.height as f64 * self.dpr).floor() as u32,
            )
        }

        fn apply(&self, canvas: &HtmlCanvasElement) {
            let (w, h) = self.physical_size();
            canvas.set_width(w);
            canvas.set_height(h);
            let style = canvas.style();
            let _ = style.set_property("width", &format!("{}px", self.width));
            let _ = style.set_property("height", &format!("{}px", self.height));
        }
    }

    /// Same clock as the animation frame timestamps
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Streamy starting...");

        if let Err(e) = start().await {
            log::error!("Start-up failed: {}", e);
        }
    }

    async fn start() -> Result<(), String> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no #gameCanvas element")?
            .dyn_into()
            .map_err(|_| "#gameCanvas is not a canvas")?;

        let viewport = Viewport::current().ok_or("viewport size unavailable")?;
        viewport.apply(&canvas);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let app = App::new(
            Tuning::load(),
            viewport.width,
            viewport.height,
            seed,
            LocalStore::new(),
            DomUi::new(&document),
        );
        let game = Rc::new(RefCell::new(Game {
            app,
            render_state: None,
            canvas: canvas.clone(),
        }));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| format!("failed to create surface: {}", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("failed to get adapter: {}", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            viewport.physical_size(),
            (viewport.width, viewport.height),
        )
        .await
        .map_err(|e| format!("failed to create device: {}", e))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_window_handlers(game.clone());
        setup_start_handlers(&document, game.clone());
        setup_gameover_buttons(&document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Streamy running!");
        Ok(())
    }

    fn setup_window_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().fit_canvas();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard steering
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().app.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().app.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Losing focus drops held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().app.blur();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_handlers(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("startButton") {
            for event_name in ["click", "pointerdown"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    game.borrow_mut().app.request_start(now_ms());
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }

            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), "Enter" | " ") {
                    event.prevent_default();
                    game.borrow_mut().app.request_start(now_ms());
                }
            });
            let _ =
                btn.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let panel = game.borrow().app.ui().start_panel().cloned();
        if let Some(panel) = panel {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                // Links and buttons inside the panel keep their own behavior
                let on_control = event
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                    .and_then(|el| el.closest("a, button").ok().flatten())
                    .is_some();
                if !on_control {
                    game.borrow_mut().app.request_start(now_ms());
                }
            });
            let _ = panel
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_gameover_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                log::info!("Restart requested, reloading");
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("adButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().app.request_revive(now_ms());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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
            g.app.frame(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Streamy (native) starting...");
    log::info!("Rendering needs a browser - run with `trunk serve` for the web version");

    headless_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one run with no input and report how it went
#[cfg(not(target_arch = "wasm32"))]
fn headless_run() {
    use std::time::{SystemTime, UNIX_EPOCH};
    use streamy::platform::MemoryStore;
    use streamy::sim::GameMode;
    use streamy::ui::NullUi;
    use streamy::{App, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut app = App::new(
        Tuning::default(),
        800.0,
        600.0,
        seed,
        MemoryStore::new(),
        NullUi,
    );

    let mut now = 0.0;
    app.frame(now);
    app.request_start(now);

    let mut frames = 0;
    while frames < MAX_FRAMES && app.state.mode() == GameMode::Playing {
        now += FRAME_MS;
        app.frame(now);
        frames += 1;
    }

    println!(
        "Seed {}: {} after {:.1}s, score {}, high score {}",
        seed,
        app.state.mode().as_str(),
        frames as f64 * FRAME_MS / 1000.0,
        app.state.score,
        app.high_score()
    );
}
