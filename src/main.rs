mod app;
mod cli;
mod config;
mod domain;
mod input;
mod ledger;
mod persistence;
mod ticker;
mod ui;
mod undo;

use anyhow::{Context, Result};
use app::AppState;
use clap::Parser;
use cli::Commands;
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::DateKey;
use ledger::TaskLedger;
use persistence::{config_file, ensure_data_dir, init_local_dir, log_file, FileStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Parser)]
#[command(name = "daycheck")]
#[command(about = "A calendar-scoped daily task checker with undo", long_about = None)]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Log to a file in the data directory; the TUI owns the terminal
fn setup_logging(dir: &Path, verbose: bool) -> Result<()> {
    let path = log_file(dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let dir = init_local_dir()?;
        println!("Initialized daycheck directory: {}", dir.display());
        println!();
        println!("daycheck will now use this local directory for task storage.");
        println!("Run 'daycheck' to open your tasks.");
        return Ok(());
    }

    let dir = ensure_data_dir()?;
    setup_logging(&dir, cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(&config_file(&dir)).context("Failed to load configuration")?;
    info!("Using data directory {}", dir.display());

    let mut ledger = TaskLedger::open(Box::new(FileStore::new(&dir)), config.ledger_settings());

    match cli.command {
        Some(command) => {
            let mut stdout = io::stdout().lock();
            cli::execute(&mut ledger, command, DateKey::today(), &mut stdout)
        }
        None => run_tui(ledger, config.tick_duration()),
    }
}

fn run_tui(ledger: TaskLedger, tick_rate: Duration) -> Result<()> {
    let mut app = AppState::new(ledger, DateKey::today());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!("TUI exited with error: {}", err);
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        // Expire the undo window and follow midnight
        app.tick(Instant::now());
        app.roll_over(DateKey::today());
    }
}
