//! Canvas Arcade entry point
//!
//! In the browser, picks the game named by the page and runs it on the
//! canvas. Natively, runs a game headless with scripted input.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use canvas_arcade::renderer::CanvasSurface;
    use canvas_arcade::sim::{InputEvent, Key};
    use canvas_arcade::{DefenceGame, Driver, FlappyGame, Game, Settings};

    const CANVAS_ID: &str = "canvas1";
    const FONT_FAMILY: &str = "Helvetica";

    /// Everything the animation frame callback needs
    struct App<G: Game> {
        driver: Driver<G>,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
        settings: Settings,
    }

    impl<G: Game> App<G> {
        fn frame(&mut self, time: f64) {
            self.surface
                .clear(self.canvas.width() as f32, self.canvas.height() as f32);
            if self.driver.frame(time, &mut self.surface) {
                self.settings.debug = self.driver.game.debug();
                self.settings.save();
            }
        }
    }

    fn window_size(window: &web_sys::Window) -> (u32, u32) {
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
        };
        (dim(window.inner_width()), dim(window.inner_height()))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }

        log::info!("Canvas Arcade starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let (width, height) = window_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let surface = CanvasSurface::new(ctx, document.clone(), FONT_FAMILY);
        let (w, h) = (width as f32, height as f32);

        let name = document
            .body()
            .and_then(|body| body.get_attribute("data-game"))
            .unwrap_or_default();
        log::info!("Game {:?} initialized with seed: {}", name, seed);

        match name.as_str() {
            "defence" => start(
                DefenceGame::new(&settings, w, h, seed),
                canvas,
                surface,
                settings,
            ),
            _ => start(
                FlappyGame::new(&settings, w, h, seed),
                canvas,
                surface,
                settings,
            ),
        }
        Ok(())
    }

    fn start<G: Game + 'static>(
        game: G,
        canvas: HtmlCanvasElement,
        surface: CanvasSurface,
        settings: Settings,
    ) {
        log::info!("Running {}", game.name());
        let app = Rc::new(RefCell::new(App {
            driver: Driver::new(game),
            surface,
            canvas: canvas.clone(),
            settings,
        }));
        setup_input_handlers(&canvas, app.clone());
        request_animation_frame(app);
    }

    fn touch_position(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(Vec2::new(
            (touch.client_x() as f64 - rect.left()) as f32,
            (touch.client_y() as f64 - rect.top()) as f32,
        ))
    }

    fn setup_input_handlers<G: Game + 'static>(
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App<G>>>,
    ) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                app.borrow_mut().driver.record(&InputEvent::PointerMove(pos));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                app.borrow_mut().driver.record(&InputEvent::PointerDown(pos));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_position(&canvas_clone, &event) {
                    app.borrow_mut().driver.record(&InputEvent::TouchStart(pos));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        for (kind, make) in [
            ("keydown", InputEvent::KeyDown as fn(Key) -> InputEvent),
            ("keyup", InputEvent::KeyUp as fn(Key) -> InputEvent),
        ] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_dom(&event.key());
                app.borrow_mut().driver.record(&make(key));
            });
            let _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let (width, height) = window_size(&window);
                let mut a = app.borrow_mut();
                a.canvas.set_width(width);
                a.canvas.set_height(height);
                a.driver.request_resize(width as f32, height as f32);
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame<G: Game + 'static>(app: Rc<RefCell<App<G>>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, stopping");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop<G: Game + 'static>(app: Rc<RefCell<App<G>>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use canvas_arcade::renderer::RecordingSurface;
    use canvas_arcade::sim::{GamePhase, InputEvent, Key};
    use canvas_arcade::{DefenceGame, Driver, FlappyGame, Game};

    /// 60 Hz
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const WIDTH: f32 = 1280.0;
    const HEIGHT: f32 = 720.0;

    /// Frames run and the phase the game ended in
    pub struct Outcome {
        pub frames: u32,
        pub phase: GamePhase,
        pub draw_calls: usize,
    }

    /// Drive `game` until its run ends or `frames` have passed
    pub fn run<G: Game>(
        game: G,
        frames: u32,
        mut script: impl FnMut(u32, &G) -> Vec<InputEvent>,
    ) -> Outcome {
        let mut driver = Driver::new(game);
        let mut surface = RecordingSurface::new();
        let mut frame = 0;
        while frame < frames && !driver.game.phase().is_over() {
            for event in script(frame, &driver.game) {
                driver.record(&event);
            }
            surface.clear();
            driver.frame(frame as f64 * FRAME_MS, &mut surface);
            frame += 1;
        }
        Outcome {
            frames: frame,
            phase: driver.game.phase(),
            draw_calls: surface.commands.len(),
        }
    }

    /// Flap whenever the player sinks below the middle of the screen
    pub fn flappy(game: FlappyGame, frames: u32) -> Outcome {
        run(game, frames, |_, game| {
            if game.player.pos.y > game.height * 0.5 {
                vec![InputEvent::KeyDown(Key::Space)]
            } else {
                Vec::new()
            }
        })
    }

    /// Aim at the closest living enemy and fire every few frames
    pub fn defence(game: DefenceGame, frames: u32) -> Outcome {
        run(game, frames, |frame, game| {
            let target = game
                .enemies
                .active()
                .filter(|e| e.is_alive())
                .map(|e| e.pos)
                .min_by(|a, b| {
                    a.distance_squared(game.planet.pos)
                        .total_cmp(&b.distance_squared(game.planet.pos))
                });
            match target {
                Some(pos) if frame % 10 == 0 => vec![InputEvent::PointerDown(pos)],
                Some(pos) => vec![InputEvent::PointerMove(pos)],
                None => Vec::new(),
            }
        })
    }

    pub fn size() -> Vec2 {
        Vec2::new(WIDTH, HEIGHT)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use canvas_arcade::{DefenceGame, FlappyGame, Settings};

    env_logger::init();
    log::info!("Canvas Arcade (native) starting...");

    // canvas-arcade [flappy|defence] [frames] [settings.json]
    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "flappy".to_string());
    let frames: u32 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 3600,
    };
    let settings = match args.next() {
        Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
        None => Settings::default(),
    };

    let size = headless::size();
    let seed = 42;
    let outcome = match name.as_str() {
        "flappy" => headless::flappy(FlappyGame::new(&settings, size.x, size.y, seed), frames),
        "defence" => headless::defence(DefenceGame::new(&settings, size.x, size.y, seed), frames),
        other => return Err(format!("unknown game {other:?}, expected flappy or defence").into()),
    };

    log::info!(
        "{} finished after {} frames: {:?} ({} draw calls in the last frame)",
        name,
        outcome.frames,
        outcome.phase,
        outcome.draw_calls
    );
    println!("{name}: {:?} after {} frames", outcome.phase, outcome.frames);
    Ok(())
}
