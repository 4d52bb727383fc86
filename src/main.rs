//! Road Dash entry point
//!
//! Wires the browser (canvas, input events, HUD, leaderboard service) to the
//! headless sim and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{Document, HtmlCanvasElement};

    use road_dash::leaderboard::{self, LeaderboardEntry, ScoreSubmission};
    use road_dash::renderer::{CanvasSurface, DrawSurface, draw_frame};
    use road_dash::sim::{GameState, TickInput, tick};
    use road_dash::telegram;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        surface: CanvasSurface,
        input: TickInput,
        last_time: f64,
        /// Pending animation-frame handle; cancelled on restart so two loops
        /// never overlap
        raf_id: Option<i32>,
        /// Submission sink already fired for this run
        submitted: bool,
    }

    impl Game {
        fn new(seed: u64, surface: CanvasSurface) -> Self {
            let (w, h) = (surface.width(), surface.height());
            Self {
                state: GameState::new(seed, w, h),
                surface,
                input: TickInput::default(),
                last_time: 0.0,
                raf_id: None,
                submitted: false,
            }
        }

        /// Replace the session with a fresh one on the same canvas
        fn restart(&mut self, seed: u64) {
            let (w, h) = (self.surface.width(), self.surface.height());
            self.state = GameState::new(seed, w, h);
            self.input = TickInput::default();
            self.last_time = 0.0;
            self.submitted = false;
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Road Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the canvas to the viewport
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(400.0) as u32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let surface = CanvasSurface::new(canvas).expect("failed to create draw surface");

        telegram::init();

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, surface)));
        log::info!("session started with seed {seed}");

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_resize_handler(game.clone());

        schedule_frame(game);
        log::info!("Road Dash running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Tap / click anywhere
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.state.is_over() {
                    g.input.turn = true;
                }
            });
            let _ =
                document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Space (desktop testing)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.code() == "Space" {
                    let mut g = game.borrow_mut();
                    if !g.state.is_over() {
                        g.input.turn = true;
                    }
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch; prevent_default stops the browser from synthesizing a second
        // click for the same tap
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if !g.state.is_over() {
                    g.input.turn = true;
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                // keep the button press from doubling as a turn tap
                event.stop_propagation();

                {
                    let mut g = game.borrow_mut();
                    // cancel any pending frame before building the new session
                    if let Some(id) = g.raf_id.take() {
                        let _ = web_sys::window().unwrap().cancel_animation_frame(id);
                    }
                    let seed = js_sys::Date::now() as u64;
                    g.restart(seed);
                    log::info!("restarted with seed {seed}");
                }

                let document = web_sys::window().unwrap().document().unwrap();
                set_hidden(&document, "game-over", true);
                update_score_display(&document, 0);
                telegram::hide_share_button();

                schedule_frame(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let g = game.borrow();
            if g.state.is_over() {
                return;
            }
            let window = web_sys::window().unwrap();
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as u32;
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as u32;
            if width > 0 && height > 0 {
                g.surface.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn schedule_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let cb_game = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(cb_game, time);
        });
        let id = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .unwrap_or(0);
        game.borrow_mut().raf_id = Some(id);
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let just_ended = {
            let mut g = game.borrow_mut();
            g.raf_id = None;

            let dt_ms = if g.last_time > 0.0 {
                (time - g.last_time) as f32
            } else {
                16.0
            };
            g.last_time = time;

            let input = g.input.clone();
            tick(&mut g.state, &input, dt_ms);
            g.input.turn = false; // one-shot

            {
                let Game { state, surface, .. } = &mut *g;
                draw_frame(state, surface);
            }

            let document = web_sys::window().unwrap().document().unwrap();
            update_score_display(&document, g.state.score);

            g.state.is_over() && !g.submitted
        };

        if just_ended {
            game.borrow_mut().submitted = true;
            on_game_over(&game);
            // terminal: no further frame is scheduled
            return;
        }

        schedule_frame(game);
    }

    /// Freeze-frame UI plus the submission sink (fire-and-forget)
    fn on_game_over(game: &Rc<RefCell<Game>>) {
        let (score, cause) = {
            let g = game.borrow();
            (g.state.score, g.state.cause)
        };
        log::info!("game over ({cause:?}), final score {score}");

        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id("final-score") {
            el.set_text_content(Some(&format!("Score: {score}")));
        }
        set_hidden(&document, "game-over", false);

        telegram::show_share_button(score);

        let username = telegram::username().unwrap_or_else(|| "Anonymous".to_string());
        spawn_local(async move {
            submit_and_show_leaderboard(ScoreSubmission { username, score }).await;
        });
    }

    /// Submission sink: POST the score, surface the rank, then refresh the
    /// leaderboard list. Every failure is non-fatal; the frozen score is
    /// already on screen.
    async fn submit_and_show_leaderboard(submission: ScoreSubmission) {
        let document = web_sys::window().unwrap().document().unwrap();

        match leaderboard::submit_score(&submission).await {
            Ok(outcome) => {
                if outcome.made_top_ten() {
                    if let Some(rank) = outcome.rank {
                        show_notice(&document, &format!("You made the top 10: #{rank}!"));
                    }
                }
            }
            Err(err) => {
                log::warn!("score submission failed: {err:?}");
                show_notice(&document, "Score could not be submitted");
            }
        }

        match leaderboard::fetch_leaderboard().await {
            Ok(entries) => render_leaderboard(&document, &entries),
            Err(err) => log::warn!("leaderboard fetch failed: {err:?}"),
        }
    }

    fn render_leaderboard(document: &Document, entries: &[LeaderboardEntry]) {
        let Some(list) = ensure_leaderboard_list(document) else {
            return;
        };
        list.set_inner_html("");
        for entry in entries {
            if let Ok(item) = document.create_element("li") {
                item.set_text_content(Some(&format!("{}: {}", entry.username, entry.score)));
                let _ = list.append_child(&item);
            }
        }
    }

    /// Find or create the ordered list inside the game-over screen
    fn ensure_leaderboard_list(document: &Document) -> Option<web_sys::Element> {
        if let Some(list) = document.get_element_by_id("high-scores-list") {
            return Some(list);
        }

        let overlay = document.get_element_by_id("game-over")?;
        let container = document.create_element("div").ok()?;

        let title = document.create_element("h3").ok()?;
        title.set_text_content(Some("High Scores"));
        container.append_child(&title).ok()?;

        let list = document.create_element("ol").ok()?;
        list.set_id("high-scores-list");
        container.append_child(&list).ok()?;

        overlay.append_child(&container).ok()?;
        Some(list)
    }

    fn show_notice(document: &Document, text: &str) {
        let Some(overlay) = document.get_element_by_id("game-over") else {
            return;
        };
        if let Ok(el) = document.create_element("div") {
            el.set_text_content(Some(text));
            let _ = overlay.append_child(&el);
        }
    }

    fn update_score_display(document: &Document, score: u32) {
        if let Some(el) = document.get_element_by_id("score-display") {
            el.set_text_content(Some(&format!("Score: {score}")));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let style = if hidden { "display: none" } else { "display: block" };
            let _ = el.set_attribute("style", style);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Road Dash (native) starting...");
    log::info!("native mode is a headless smoke run; serve the wasm build for the playable game");

    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a scripted session end to end without a browser: a naive autopilot
/// taps whenever the pending turn is takeable, until the road wins.
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use road_dash::leaderboard::{self, ScoreSubmission};
    use road_dash::sim::{GameState, Heading, TickInput, TurnDir, attempt_turn, tick};

    let mut state = GameState::new(0x5EED, 400.0, 800.0);
    let input = TickInput::default();

    while !state.is_over() && state.frames < 100_000 {
        let takeable = matches!(
            (state.player.heading, state.road.next_turn()),
            (Heading::Up, Some(TurnDir::Left | TurnDir::Right))
                | (Heading::Left | Heading::Right, Some(TurnDir::Straight))
        );
        if takeable {
            attempt_turn(&mut state);
        }
        tick(&mut state, &input, 16.0);
    }

    log::info!(
        "demo run ended after {} frames: score {}, cause {:?}",
        state.frames,
        state.score,
        state.cause
    );

    leaderboard::submit_score(&ScoreSubmission {
        username: "demo".to_string(),
        score: state.score,
    });
}
