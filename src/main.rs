//! Blockfall terminal runner (default binary).
//!
//! Reads [`Config`] from the environment, then runs the game loop: crossterm
//! input with key repeat, a frame clock driving gravity, and a diffing
//! framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{Controller, GameState};
use blockfall::input::{handle_key_event, repeat_action, should_quit, InputHandler};
use blockfall::term::{Bell, GameView, Screen, TerminalRenderer};
use blockfall::types::GameAction;
use blockfall::{Config, EventLog, GameSummary};

fn main() -> Result<()> {
    let config = Config::from_env();

    let log = match config.log_path.as_deref() {
        Some(path) => Some(EventLog::open(path)?),
        None => None,
    };
    eprintln!(
        "[blockfall] seed {} frame {}ms bell {}",
        config.seed,
        config.frame_ms,
        if config.bell { "on" } else { "off" }
    );
    if let Some(path) = config.log_path.as_deref() {
        eprintln!("[blockfall] event log {}", path);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, log);

    // Always try to restore terminal state.
    let _ = term.exit();

    let summary = result?;
    eprintln!(
        "[blockfall] score {} lines {} level {}",
        summary.score, summary.lines, summary.level
    );
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &Config, log: Option<EventLog>) -> Result<GameSummary> {
    let sink = (Bell::stdout(config.bell), log);
    let mut controller = Controller::new(GameState::new(config.seed), Screen::new(), sink);

    let view = GameView::default();
    let mut input = InputHandler::new();

    let epoch = Instant::now();
    let now_ms = || epoch.elapsed().as_millis() as u64;
    let frame_duration = Duration::from_millis(config.frame_ms);
    let mut last_frame = Instant::now();
    let mut summary_logged = false;

    controller.start(now_ms());

    loop {
        // Render (no-op while the screen is clean).
        term.present(&view, controller.renderer_mut())?;

        // Input with timeout until next frame.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            break;
                        }

                        if repeat_action(key.code).is_some() {
                            if let Some(action) = input.handle_key_press(key.code) {
                                controller.apply(action);
                            }
                        } else if let Some(action) = handle_key_event(key) {
                            controller.apply(action);
                            if action == GameAction::Restart {
                                input.reset();
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Ignore terminal auto-repeat; the input handler repeats internally.
                    }
                    KeyEventKind::Release => {
                        input.handle_key_release(key.code);
                    }
                },
                Event::Resize(width, height) => term.resize(width, height),
                _ => {}
            }
        }

        // Frame.
        if last_frame.elapsed() >= frame_duration {
            let elapsed = last_frame.elapsed().as_millis() as u32;
            last_frame = Instant::now();

            for action in input.update(elapsed) {
                controller.apply(action);
            }
            controller.frame(now_ms());
        }

        let over = controller.state().is_game_over();
        if over && !summary_logged {
            let summary = GameSummary::from(controller.state());
            if let Some(log) = controller.sink_mut().1.as_mut() {
                log.write_summary(summary);
            }
        }
        summary_logged = over;
    }

    controller.stop();
    let (state, _, _) = controller.into_parts();
    Ok(GameSummary::from(&state))
}
