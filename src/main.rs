//! Terminal host for the falling-block game.
//!
//! Owns the frame loop: polls crossterm for input until the next frame is
//! due, forwards key events to the session as input actions, feeds the
//! session the elapsed frame time, and redraws through the framebuffer
//! renderer.
//!
//! Set `TUI_BLOCKS_LOG=<file>` to write diagnostics (filtered by `RUST_LOG`,
//! default `debug`) to a file instead of the screen.

use std::fs::File;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::info;

use tui_blocks::config::{load_config, parse_args};
use tui_blocks::core::GameSession;
use tui_blocks::input::{action_for, should_quit, KeyTrigger};
use tui_blocks::term::{Cell, FrameBuffer, TermCanvas, TerminalRenderer};
use tui_blocks::types::GameConfig;

/// Target frame time (~60 FPS)
const FRAME_MS: u64 = 16;

const LOG_ENV: &str = "TUI_BLOCKS_LOG";

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    let config = load_config(cli.config_path.as_deref())?;
    init_logging()?;

    let seed = cli.seed.unwrap_or_else(time_seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {}", path))?;
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());
    env_logger::Builder::new()
        .parse_filters(&filters)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, config: GameConfig, seed: u32) -> Result<()> {
    let mut game = GameSession::new(config, seed)?;
    let trigger = KeyTrigger::detect(term.release_events());
    info!("session started: seed={} trigger={:?}", game.seed(), trigger);

    let (max_cols, max_rows) = TermCanvas::screen_cells(&config);
    let mut fb = FrameBuffer::new(max_cols, max_rows);

    let frame = Duration::from_millis(FRAME_MS);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((max_cols, max_rows));
        let (w, h) = (w.min(max_cols), h.min(max_rows));
        if (w, h) != (fb.width(), fb.height()) {
            fb.resize(w, h);
            term.invalidate();
        }
        fb.clear(Cell::default());
        game.draw(&mut TermCanvas::new(&mut fb, config.cell_size));
        term.present(&fb)?;

        // Input, until the next frame is due.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = action_for(key, trigger) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Time.
        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            let dt_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            game.update(dt_ms);
        }
    }
}
