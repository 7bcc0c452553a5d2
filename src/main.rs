//! Terminal Gravitris runner (default binary).
//!
//! Reads the config (file plus command-line overrides), optionally sets up
//! file logging, then runs the fixed-timestep input/tick/render loop until
//! the player quits.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use gravitris::core::{GameConfig, GameSession, GameSnapshot};
use gravitris::input::{handle_key_event, should_quit};
use gravitris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use gravitris::types::TICK_MS;

/// Falling-block puzzle in the terminal where gravity rotates.
#[derive(Debug, Parser)]
#[command(
    name = "gravitris",
    version,
    about = "Falling-block puzzle in the terminal. Every few seconds gravity turns a quarter turn and the field turns with it.",
    long_about = "Gravitris is a falling-block puzzle whose gravity rotates.\n\n\
        Pieces fall toward the current gravity direction. Every period gravity turns \
        a quarter turn counter-clockwise (down, left, up, right) and the field is redrawn \
        so gravity still points to the bottom of the screen. Lines are cleared along the \
        gravity axis in the half of the field gravity pulls toward.\n\n\
        CONTROLS:\n  Left/Right/Down, A/D/S, H/L/J   Move\n  Q/Z/Up/W/K   Rotate left\n  \
        E/X   Rotate right\n  R   Restart\n  Esc / Ctrl-C   Quit"
)]
pub struct Args {
    /// JSON config file; missing keys keep their defaults.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long, value_name = "COLS")]
    pub width: Option<u16>,

    /// Grid height in cells.
    #[arg(long, value_name = "ROWS")]
    pub height: Option<u16>,

    /// Seed for the piece sequence. Random when neither this nor a config file sets it.
    #[arg(long, value_name = "N")]
    pub seed: Option<u32>,

    /// Milliseconds between gravity changes.
    #[arg(long, value_name = "MS")]
    pub gravity_period_ms: Option<u32>,

    /// Write logs to this file (filter with RUST_LOG, default "info").
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig {
                seed: clock_seed(),
                ..GameConfig::default()
            },
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(period) = self.gravity_period_ms {
            config.gravity_period_ms = period;
        }
        config.validate()?;
        Ok(config)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Logging goes to a file only: stdout belongs to the game screen.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("install log subscriber: {err}"))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = args.game_config().context("invalid game config")?;
    info!(
        width = config.width,
        height = config.height,
        seed = config.seed,
        gravity_period_ms = config.gravity_period_ms,
        "starting gravitris"
    );

    let mut session = GameSession::with_config(config);
    session.start();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();

    info!(score = session.score(), lines = session.lines(), "session closed");
    result
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    let view = GameView::default();
    let mut snapshot = GameSnapshot::new(session.config().width, session.config().height);
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        debug!(action = action.as_str(), "input");
                        session.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
            for event in session.take_events() {
                debug!(?event, score = session.score(), "session event");
            }
        }
    }
}
