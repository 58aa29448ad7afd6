//! Terminal ladder race runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from the `term`
//! crate. Rolls are animated one node per `--step-ms`.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};

use ladder_games::config::{parse_run_args, RunConfig, USAGE};
use ladder_games::core::{GameSnapshot, TurnEngine, TurnPhase};
use ladder_games::input::{handle_key_event, should_quit};
use ladder_games::logging::init_file_logging;
use ladder_games::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};

const IDLE_POLL_MS: u64 = 250;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config) = parse_run_args(&args)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    if let Some(path) = &config.log {
        init_file_logging(path)?;
    }
    info!(seed = config.seed, players = ?config.players, "starting");

    let mut engine = TurnEngine::new(config.seed);
    engine.start_game(&config.players)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, engine: &mut TurnEngine, config: &RunConfig) -> Result<()> {
    let view = BoardView::default();
    let step = Duration::from_millis(config.step_ms);
    let idle = Duration::from_millis(IDLE_POLL_MS);

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut status: Option<String> = None;
    let mut last_step = Instant::now();

    loop {
        engine.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((100, 32));
        view.render_into_with_status(&snap, status.as_deref(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = if engine.phase() == TurnPhase::Moving {
            step.saturating_sub(last_step.elapsed())
        } else {
            idle
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        status = match engine.apply_action(action) {
                            Ok(()) => None,
                            Err(e) if e.is_rejection() => {
                                debug!(action = action.as_str(), error = %e, "action rejected");
                                Some(e.to_string())
                            }
                            Err(e) => {
                                warn!(action = action.as_str(), error = %e, "action failed");
                                Some(format!("{}; press g to try again", e))
                            }
                        };
                        last_step = Instant::now();
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if engine.phase() == TurnPhase::Moving && last_step.elapsed() >= step {
            engine.advance_step();
            last_step = Instant::now();
        }

        for event in engine.drain_events() {
            debug!(?event, "game event");
        }
    }
}
