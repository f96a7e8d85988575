//! # Game of Life
//!
//! A terminal front end for the bounded Game of Life session, using the
//! `ratatui` library for the terminal user interface and `crossterm` for
//! terminal manipulation.
//!
//! ## Features
//!
//! * Interactive editing with the keyboard or the mouse
//! * Start/stop, single step, and reset to the last baseline
//! * Adjustable step delay
//! * Real-time statistics and system memory
//! * Headless batch mode that prints the final board

mod app;
mod ui;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::{Backend, CrosstermBackend}, Terminal};
use std::{
    error::Error,
    fs::File,
    io::{self, Write},
    sync::Mutex,
    time::{Duration, Instant},
};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use conway_tui::{Config, Session};

use app::App;

/// Density used by the random fill key when none was configured.
const DEFAULT_DENSITY: f64 = 0.3;

/// Installs the tracing subscriber.
///
/// Interactive mode owns the terminal, so it only logs when `--log-file` is
/// given. Headless mode logs to stderr and keeps stdout for the board.
fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    let level = if config.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("conway_tui={level}")));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &config.log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| err.to_string())?;
        }
        None if config.headless => builder
            .with_writer(io::stderr)
            .try_init()
            .map_err(|err| err.to_string())?,
        None => {}
    }
    Ok(())
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Builds the session and lays out the starting board.
fn build_session(config: &Config, rng: &mut StdRng) -> Result<Session, Box<dyn Error>> {
    let mut session = Session::new(config.rows, config.columns)?
        .with_strategy(config.strategy())
        .with_timer_delay(config.timer_delay())?;

    if let Some(pattern) = config.load_pattern()? {
        session.load_pattern(&pattern)?;
    } else if let Some(density) = config.density {
        session.randomize(rng, density)?;
    }
    info!(
        rows = config.rows,
        columns = config.columns,
        population = session.current().population(),
        "session ready"
    );
    Ok(session)
}

/// Evolves the configured number of generations and prints the final board.
fn run_headless(mut session: Session, generations: u64) -> Result<(), Box<dyn Error>> {
    for _ in 0..generations {
        session.evolve()?;
    }
    let stats = session.stats();
    info!(
        generation = stats.generation,
        population = stats.current_population,
        births = stats.cells_created,
        deaths = stats.cells_destroyed,
        "headless run finished"
    );

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", session.current())?;
    stdout.flush()?;
    Ok(())
}

/// Main event loop: draw, handle input, then turn delivered ticks into
/// generations.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    frame_rate: Duration,
) -> Result<(), Box<dyn Error>> {
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = frame_rate
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key.code),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
        if app.should_quit() {
            break;
        }

        if last_frame.elapsed() >= frame_rate {
            app.on_frame();
            last_frame = Instant::now();
        }
    }

    if let Some(ticker) = app.ticker.take() {
        app.session.stop(ticker);
    }
    Ok(())
}

/// Main entry point.
///
/// Parses the configuration, then either runs headless or sets up the
/// terminal and runs the interactive loop. The terminal is restored even if
/// the loop fails.
///
/// # Errors
///
/// Returns an error for invalid configuration or if terminal manipulation
/// fails.
fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    config.validate()?;
    init_logging(&config)?;

    let mut rng = make_rng(config.seed);
    let session = build_session(&config, &mut rng)?;

    if config.headless {
        return run_headless(session, config.generations);
    }

    let mut app = App::new(session, rng, config.density.unwrap_or(DEFAULT_DENSITY));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, config.frame_interval());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
