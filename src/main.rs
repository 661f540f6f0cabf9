//! Canvas Breakout entry point
//!
//! Browser: wires the DOM to the game controller and paints with Canvas 2D.
//! Native: plays a headless autopilot session and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, HtmlSelectElement, MouseEvent};

    use canvas_breakout::renderer::{CanvasPainter, build_scene};
    use canvas_breakout::scheduler::{FrameToken, Scheduler, TimerToken};
    use canvas_breakout::sim::{Difficulty, GameEvent};
    use canvas_breakout::{Background, Command, Game, HudView, Settings};

    /// `requestAnimationFrame` / `setTimeout` backed scheduler.
    /// Holds the shell weakly; callbacks after teardown do nothing.
    struct BrowserScheduler {
        shell: Weak<RefCell<Shell>>,
    }

    impl Scheduler for BrowserScheduler {
        fn request_frame(&mut self, token: FrameToken) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let shell = self.shell.clone();
            let closure = Closure::<dyn FnMut(f64)>::once(move |_time: f64| {
                if let Some(shell) = shell.upgrade() {
                    on_frame(&shell, token);
                }
            });
            if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {:?}", e);
            }
            closure.forget();
        }

        fn set_timeout(&mut self, delay_ms: u32, token: TimerToken) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let shell = self.shell.clone();
            let closure = Closure::<dyn FnMut()>::once(move || {
                if let Some(shell) = shell.upgrade() {
                    on_timer(&shell, token);
                }
            });
            if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms as i32,
            ) {
                log::error!("setTimeout failed: {:?}", e);
            }
            closure.forget();
        }
    }

    /// Everything the page needs between callbacks
    struct Shell {
        game: Game<BrowserScheduler>,
        painter: CanvasPainter,
        settings: Settings,
        document: Document,
    }

    impl Shell {
        /// Repaint and refresh the DOM after any state change
        fn sync(&mut self) {
            for event in self.game.drain_events() {
                match event {
                    GameEvent::GameOver(cause) => {
                        log::info!("Game over: {:?}, final score {}", cause, self.game.state().score)
                    }
                    GameEvent::LifeLost { remaining } => log::info!("Life lost ({} left)", remaining),
                    _ => log::debug!("{:?}", event),
                }
            }

            let cmds = build_scene(self.game.state(), &self.settings);
            if let Err(e) = self.painter.paint(&cmds) {
                log::warn!("Paint error: {:?}", e);
            }
            self.update_hud();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let hud = HudView::from_state(self.game.state());
            let document = &self.document;

            if let Some(el) = document.get_element_by_id("lives") {
                el.set_text_content(Some(&hud.lives_text));
                set_style(&el, "color", hud.lives_color.css());
            }

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score_text));
            }

            if let Some(el) = document.get_element_by_id("restartButton") {
                set_style(&el, "display", if hud.restart_visible { "block" } else { "none" });
            }

            if let Some(el) = document.get_element_by_id("message") {
                match hud.message {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        set_style(&el, "display", "block");
                    }
                    None => set_style(&el, "display", "none"),
                }
            }
        }

        fn set_background(&mut self, background: Background) {
            self.settings.background = background;
            apply_background(&self.document, background);
        }
    }

    fn set_style(el: &Element, property: &str, value: &str) {
        if let Some(el) = el.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property(property, value);
        }
    }

    fn apply_background(document: &Document, background: Background) {
        if let Some(body) = document.body() {
            let style = body.style();
            let _ = style.set_property("background-image", background.css_image());
            let _ = style.set_property("background-size", "cover");
            let _ = style.set_property("background-position", "center");
        }
    }

    fn dispatch(shell: &Rc<RefCell<Shell>>, command: Command) {
        let mut s = shell.borrow_mut();
        s.game.handle(command);
        s.sync();
    }

    fn on_frame(shell: &Rc<RefCell<Shell>>, token: FrameToken) {
        let mut s = shell.borrow_mut();
        s.game.on_frame(token);
        s.sync();
    }

    fn on_timer(shell: &Rc<RefCell<Shell>>, token: TimerToken) {
        let mut s = shell.borrow_mut();
        if s.game.on_timer(token) {
            s.sync();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Canvas Breakout starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = document
            .get_element_by_id("settings")
            .and_then(|el| el.text_content())
            .map(|json| Settings::from_json_or_default(&json))
            .unwrap_or_default();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let painter = CanvasPainter::new(canvas.clone())?;

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        apply_background(&document, settings.background);

        let shell = Rc::new_cyclic(|weak: &Weak<RefCell<Shell>>| {
            RefCell::new(Shell {
                game: Game::new(
                    BrowserScheduler {
                        shell: weak.clone(),
                    },
                    seed,
                ),
                painter,
                settings,
                document: document.clone(),
            })
        });

        setup_level_buttons(&document, &shell)?;
        setup_canvas_input(&canvas, &shell)?;
        setup_restart_button(&document, &shell)?;
        setup_background_selector(&document, &shell)?;

        shell.borrow_mut().sync();

        log::info!("Canvas Breakout ready, pick a level");
        Ok(())
    }

    fn setup_level_buttons(document: &Document, shell: &Rc<RefCell<Shell>>) -> Result<(), JsValue> {
        let buttons = document.query_selector_all(".levelButton")?;
        for i in 0..buttons.length() {
            let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let level = button
                .get_attribute("data-level")
                .and_then(|s| s.trim().parse::<u8>().ok())
                .and_then(Difficulty::from_index);
            let Some(difficulty) = level else {
                log::warn!("Level button {} has no valid data-level", i);
                continue;
            };

            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&shell, Command::SelectLevel(difficulty));
            });
            button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_canvas_input(canvas: &HtmlCanvasElement, shell: &Rc<RefCell<Shell>>) -> Result<(), JsValue> {
        // Mouse move - horizontal position relative to the canvas
        {
            let shell = shell.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                dispatch(&shell, Command::PointerMove { x });
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click - start, resume or jump
        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&shell, Command::Click);
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(document: &Document, shell: &Rc<RefCell<Shell>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("restartButton") {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&shell, Command::Restart);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_background_selector(document: &Document, shell: &Rc<RefCell<Shell>>) -> Result<(), JsValue> {
        let Some(select) = document
            .get_element_by_id("backgroundSelector")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        else {
            return Ok(());
        };
        select.set_value(shell.borrow().settings.background.as_str());

        let shell = shell.clone();
        let select_clone = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let value = select_clone.value();
            match Background::from_str(&value) {
                Some(background) => shell.borrow_mut().set_background(background),
                None => log::warn!("Unknown background: {}", value),
            }
        });
        select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
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

/// Frame cap for the headless session
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 200_000;

/// Virtual time per frame (ms), used to fire jump timers
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: u64 = 16;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use canvas_breakout::sim::{Difficulty, GamePhase};
    use canvas_breakout::{Command, Game, HudView, ManualScheduler};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let difficulty = args
        .next()
        .and_then(|a| a.parse::<u8>().ok())
        .and_then(Difficulty::from_index)
        .unwrap_or_default();
    let seed = args.next().and_then(|a| a.parse::<u64>().ok()).unwrap_or(12345);

    log::info!("Canvas Breakout (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    let mut game = Game::new(ManualScheduler::new(), seed);
    game.handle(Command::SelectLevel(difficulty));
    game.handle(Command::Click);

    let mut frames = 0u64;
    while frames < MAX_FRAMES {
        let Some(token) = game.scheduler_mut().take_frame() else {
            if game.state().phase == GamePhase::Paused {
                game.handle(Command::Click);
                continue;
            }
            break;
        };

        // Track the ball, off-centre so the bounce angle is never a fixed loop
        let ball_x = game.state().ball.pos.x;
        let wobble = ((frames / 97) % 5) as f32 * 8.0 - 16.0;
        game.handle(Command::PointerMove { x: ball_x + wobble });
        if frames % 240 == 0 {
            game.handle(Command::Click);
        }

        game.on_frame(token);
        for timer in game.scheduler_mut().advance(FRAME_MS) {
            game.on_timer(timer);
        }
        game.drain_events();
        frames += 1;
    }

    let state = game.state();
    let hud = HudView::from_state(state);
    println!(
        "{} ({}): {} | {} | {} bricks left | {:?} after {} frames",
        difficulty.as_str(),
        seed,
        hud.lives_text,
        hud.score_text,
        state.bricks.remaining(),
        state.phase,
        frames
    );

    match state.to_snapshot() {
        Ok(json) => log::debug!("Final state: {}", json),
        Err(e) => log::warn!("Could not serialize final state: {}", e),
    }
}
