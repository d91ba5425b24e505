//! Skyward entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{EventTarget, HtmlCanvasElement, KeyboardEvent};

    use skyward::audio::AudioManager;
    use skyward::persistence::{KeyValueStore, LocalStorage, MemoryStore};
    use skyward::platform::InputState;
    use skyward::renderer::RenderState;
    use skyward::sim::{GameEvent, RenderSnapshot, SimulationClock};
    use skyward::{Error, HighScore, Result, Settings};

    /// Longest frame fed to the simulation (tab switches, breakpoints)
    const MAX_FRAME_MS: f64 = 1000.0;

    type Store = Box<dyn KeyValueStore>;
    type Clock = SimulationClock<HighScore<Store>, AudioManager>;

    /// A DOM listener we must detach on teardown
    struct Listener {
        target: EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl Listener {
        fn attach(
            target: &EventTarget,
            kind: &'static str,
            closure: Closure<dyn FnMut(web_sys::Event)>,
        ) -> Option<Self> {
            target
                .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
                .ok()?;
            Some(Self {
                target: target.clone(),
                kind,
                closure,
            })
        }

        fn detach(self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
        }
    }

    /// Game instance holding all state
    struct Game {
        clock: Clock,
        render_state: Option<RenderState>,
        input: InputState,
        last_time: Option<f64>,
        listeners: Vec<Listener>,
    }

    impl Game {
        /// Advance the clock by the real time since the last frame
        fn update(&mut self, time: f64) {
            let dt = match self.last_time {
                Some(last) => (time - last).clamp(0.0, MAX_FRAME_MS),
                None => 0.0,
            };
            self.last_time = Some(time);

            let input = self.input.take_tick_input();
            for event in self.clock.step(&input, dt) {
                if let GameEvent::GameOver { score, new_high_score } = event {
                    log::info!(
                        "Final score {}{}",
                        score,
                        if new_high_score { " - new high score!" } else { "" }
                    );
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, snapshot: &RenderSnapshot) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            match render_state.draw(snapshot) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, snapshot: &RenderSnapshot) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let set = |id: &str, text: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };
            set("hud-score", &snapshot.score.to_string());
            set("hud-high-score", &snapshot.high_score.to_string());
            set("hud-altitude", &format!("{} ft", snapshot.altitude_feet));
            set("hud-status", &snapshot.status.label());
        }

        /// Cancel the loop and detach every listener
        fn stop(&mut self) {
            self.clock.stop();
            self.input.release_all();
            for listener in self.listeners.drain(..) {
                listener.detach();
            }
        }
    }

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    fn open_store() -> Store {
        match LocalStorage::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{} - progress will not be saved", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub async fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Skyward starting...");

        let window = web_sys::window().ok_or_else(|| Error::SurfaceMissing("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::SurfaceMissing("no document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| Error::SurfaceMissing("no #gameCanvas element".into()))?
            .dyn_into()
            .map_err(|_| Error::SurfaceMissing("#gameCanvas is not a canvas".into()))?;

        let (width, height) = fit_canvas(&window, &canvas);

        let store = open_store();
        let settings = Settings::load(&store);
        let config = settings.profile.config();
        let viewport = config.viewport;

        let seed = js_sys::Date::now() as u64;
        let mut clock = SimulationClock::new(
            config,
            seed,
            HighScore::new(store),
            AudioManager::new(settings),
        )?;
        log::info!("Game initialized with seed {} ({})", seed, settings.profile.as_str());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| Error::Gpu(format!("failed to create surface: {}", e)))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| Error::Gpu(format!("failed to get adapter: {}", e)))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, viewport).await?;

        clock.start();
        let game = Rc::new(RefCell::new(Game {
            clock,
            render_state: Some(render_state),
            input: InputState::new(),
            last_time: None,
            listeners: Vec::new(),
        }));

        setup_input_handlers(&game, &canvas);
        GAME.with(|g| *g.borrow_mut() = Some(game.clone()));
        request_animation_frame(game);

        log::info!("Skyward running!");
        Ok(())
    }

    /// Match the canvas backing store to its CSS size at the device pixel ratio
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    fn setup_input_handlers(game: &Rc<RefCell<Game>>, canvas: &HtmlCanvasElement) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };
        let mut listeners = Vec::new();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let mut g = game.borrow_mut();
                g.clock.cues().resume();
                if g.input.key_down(&event.key(), event.repeat()) {
                    event.prevent_default();
                }
            });
            listeners.extend(Listener::attach(&document, "keydown", closure));
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    game.borrow_mut().input.key_up(&event.key());
                }
            });
            listeners.extend(Listener::attach(&document, "keyup", closure));
        }

        // Tab hidden or window blur: drop held keys and pause
        for (target, kind) in [
            (document.clone().unchecked_into::<EventTarget>(), "visibilitychange"),
            (window.clone().unchecked_into::<EventTarget>(), "blur"),
        ] {
            let game = game.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if kind == "visibilitychange"
                    && document.visibility_state() != web_sys::VisibilityState::Hidden
                {
                    return;
                }
                let mut g = game.borrow_mut();
                g.input.release_all();
                if g.clock.pause() {
                    log::info!("Auto-paused ({})", kind);
                }
            });
            listeners.extend(Listener::attach(&target, kind, closure));
        }

        // Window resize: the renderer letterboxes the game area into the new size
        {
            let game = game.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else { return };
                let (width, height) = fit_canvas(&window, &canvas);
                if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
                    render_state.resize(width, height);
                }
            });
            listeners.extend(Listener::attach(
                &window.clone().unchecked_into::<EventTarget>(),
                "resize",
                closure,
            ));
        }

        game.borrow_mut().listeners = listeners;
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
            if g.clock.is_stopped() {
                return;
            }
            g.update(time);
            let snapshot = g.clock.snapshot();
            g.render(&snapshot);
            g.update_hud(&snapshot);
        }
        request_animation_frame(game);
    }

    /// Full teardown: no more frames, listeners or sounds
    pub fn stop() {
        if let Some(game) = GAME.with(|g| g.borrow_mut().take()) {
            game.borrow_mut().stop();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Failed to start: {}", e);
    }
}

/// Exposed to the page so it can leave the game screen
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_game() {
    wasm_game::stop();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Skyward (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let profile = args
        .next()
        .map(|name| {
            skyward::Profile::from_name(&name).unwrap_or_else(|| {
                log::warn!("Unknown profile {:?}, using Classic", name);
                skyward::Profile::Classic
            })
        })
        .unwrap_or_default();
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random::<u64>);

    match headless::run(profile, seed) {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use skyward::persistence::MemoryStore;
    use skyward::sim::{SilentCues, SimulationClock, SimulationState, TickInput};
    use skyward::{HighScore, Profile, Result};

    /// Ten simulated minutes at 60 Hz
    const MAX_FRAMES: u32 = 36_000;
    /// Horizontal slack before the autopilot steers
    const DEADZONE: f32 = 4.0;

    /// Steer toward the nearest platform above the player's feet
    fn autopilot(state: &SimulationState) -> TickInput {
        let player = &state.player;
        let center = player.pos.x + player.size.x / 2.0;
        let target = state
            .platforms
            .iter()
            .filter(|p| p.y > player.bottom() - 150.0 && p.y < player.bottom())
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|p| p.x + p.width / 2.0);

        match target {
            Some(x) if x < center - DEADZONE => TickInput {
                left: true,
                ..Default::default()
            },
            Some(x) if x > center + DEADZONE => TickInput {
                right: true,
                ..Default::default()
            },
            _ => TickInput::default(),
        }
    }

    pub fn run(profile: Profile, seed: u64) -> Result<String> {
        let mut clock = SimulationClock::new(
            profile.config(),
            seed,
            HighScore::new(MemoryStore::new()),
            SilentCues,
        )?;
        clock.start();

        let mut frames = 0;
        while frames < MAX_FRAMES && !clock.state().is_game_over() {
            let input = autopilot(clock.state());
            clock.step(&input, skyward::consts::FRAME_MS);
            frames += 1;
        }
        let snapshot = clock.snapshot();
        clock.stop();

        Ok(format!(
            "{} (seed {}): score {} at {} ft after {} frames",
            profile.as_str(),
            seed,
            snapshot.score,
            snapshot.altitude_feet,
            frames
        ))
    }
}
