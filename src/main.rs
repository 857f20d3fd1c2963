//! TetJeweled terminal runner (default binary).
//!
//! Uses crossterm for input and a framebuffer-based renderer. The engine reads
//! no clock: this loop measures elapsed time, feeds it to a `Scheduler`, and
//! runs the drop steps and clock seconds it reports.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event};

use tetjeweled::core::{Scheduler, Session};
use tetjeweled::input::{handle_key_event, is_press, should_quit};
use tetjeweled::term::{
    restore_terminal, ClearEffects, FrameBuffer, GameView, TerminalRenderer, Viewport,
};
use tetjeweled::types::{Palette, FRAME_MS};

/// Falling-block puzzle where both full lines and runs of three colors clear.
#[derive(Debug, Parser)]
#[command(name = "tetjeweled", version, about)]
struct Args {
    /// RNG seed; the same seed replays the same pieces. Defaults to the clock.
    #[arg(short, long)]
    seed: Option<u32>,

    /// Block colors: vivid (six colors) or classic (four, easier matches).
    #[arg(short, long, default_value = "vivid")]
    palette: PaletteArg,

    /// Write logs to this file (filter with RUST_LOG). Logging is off otherwise.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum PaletteArg {
    #[default]
    Vivid,
    Classic,
}

impl From<PaletteArg> for Palette {
    fn from(arg: PaletteArg) -> Self {
        match arg {
            PaletteArg::Vivid => Palette::Vivid,
            PaletteArg::Classic => Palette::Classic,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    // The renderer restores the terminal on a normal exit; a panic skips that.
    std::panic::set_hook(Box::new(|panic_info| {
        restore_terminal();
        eprint!("{panic_info}\n\n");
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &args);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// stdout belongs to the TUI, so logs only go to an explicit file.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, args: &Args) -> Result<()> {
    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut session = Session::with_palette(seed, args.palette.into());
    let mut scheduler = Scheduler::new(session.drop_interval_ms());
    let mut session_id = session.session_id();

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut effects = ClearEffects::new();

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();
    let mut last_advance = Instant::now();

    loop {
        // Timers. Only whole milliseconds are consumed so no time is lost.
        let elapsed_ms = last_advance.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last_advance += Duration::from_millis(elapsed_ms as u64);

        let due = scheduler.advance(elapsed_ms);
        for _ in 0..due.seconds {
            session.advance_clock();
        }
        for _ in 0..due.drops {
            if !session.tick() {
                break;
            }
        }
        scheduler.set_drop_interval(session.drop_interval_ms());
        if !session.is_running() && !scheduler.is_cancelled() {
            scheduler.cancel();
        }

        // Effects advance once per frame, then pick up new clears.
        if last_frame.elapsed() >= frame {
            last_frame = Instant::now();
            effects.step();
        }
        effects.push_events(&session.take_clear_events());

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into_with_effects(
            &session.snapshot(),
            Some(&effects),
            Viewport::new(w, h),
            &mut fb,
        );
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if is_press(&key) => {
                if should_quit(key) {
                    log::info!("quit at score {}", session.score());
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    session.apply_action(action);
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }

        // A new session gets a fresh scheduler; the old drive loop is dropped.
        if session.session_id() != session_id {
            session_id = session.session_id();
            scheduler = Scheduler::new(session.drop_interval_ms());
            effects.clear();
            last_advance = Instant::now();
        }
    }
}
