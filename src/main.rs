//! Reel Spin entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use reel_spin::consts::SIM_DT;
    use reel_spin::renderer::pipeline::client_to_stage;
    use reel_spin::renderer::{RenderState, scene};
    use reel_spin::sim::GameEvent;
    use reel_spin::{Settings, SlotMachine};

    /// Game instance holding all state
    struct Game {
        machine: SlotMachine,
        render_state: Option<RenderState>,
        last_time: f64,
        /// Canvas size in CSS pixels
        client_size: (f32, f32),
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            Self {
                machine: SlotMachine::new(settings, seed),
                render_state: None,
                last_time: 0.0,
                client_size: (1.0, 1.0),
            }
        }

        fn to_stage(&self, x: f32, y: f32) -> Vec2 {
            client_to_stage(self.client_size, self.machine.layout.view_size, x, y)
        }

        /// Run simulation steps and surface results
        fn update(&mut self, dt: f32) {
            self.machine.update(dt);

            for event in self.machine.drain_events() {
                if let GameEvent::SpinResolved(outcome) = event {
                    let text = if outcome.win { "Win!" } else { "Lose." };
                    set_text("result", text);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene::build(&self.machine);
            if let Some(ref mut render_state) = self.render_state {
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
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            el.set_text_content(Some(text));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Reel Spin starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));
        game.borrow_mut().client_size = (client_w as f32, client_h as f32);

        log::info!("Machine initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let view_size = game.borrow().machine.layout.view_size;
        let render_state = RenderState::new(surface, &adapter, width, height, view_size).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());

        // Start frame loop
        request_animation_frame(game);

        log::info!("Reel Spin running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer down - hit test the spin button
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                g.client_size = (
                    canvas_clone.client_width() as f32,
                    canvas_clone.client_height() as f32,
                );
                let point = g.to_stage(event.offset_x() as f32, event.offset_y() as f32);
                if g.machine.pointer_down(point) {
                    event.prevent_default();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.machine.key_down(&event.key(), event.repeat()) {
                    event.prevent_default();
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
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use reel_spin::consts::SIM_DT;
    use reel_spin::sim::MachinePhase;
    use reel_spin::ui::ButtonState;
    use reel_spin::{Settings, SlotMachine};

    env_logger::init();
    log::info!("Reel Spin (native) starting...");
    log::info!("Native mode runs headless spins - run with `trunk serve` for the web version");

    let spins: u32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);
    let seed: u64 = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345);

    let mut machine = SlotMachine::new(Settings::load(), seed);
    for _ in 0..spins {
        machine.press_spin();
        // Let the auto-stop timer, deceleration and alignment play out
        loop {
            machine.update(SIM_DT);
            if machine.phase() == MachinePhase::Idle && machine.button.state == ButtonState::Idle {
                break;
            }
        }

        if let Some(outcome) = &machine.last_outcome {
            let line: Vec<&str> = outcome
                .line
                .iter()
                .map(|k| k.map(|k| k.as_str()).unwrap_or("-"))
                .collect();
            println!(
                "spin {:>3}: [{}] {}",
                outcome.session,
                line.join(", "),
                if outcome.win { "WIN" } else { "lose" }
            );
        }
    }
    println!("{} win animation(s) played", machine.presentations);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
