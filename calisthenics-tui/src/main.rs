// calisthenics-tui/src/main.rs
use anyhow::{Context, Result};
use calisthenics_lib::{parse_calendar_date, TrackerService}; // Use the service from the lib
use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app; // Application state
mod ui; // UI rendering logic

use crate::app::App;

#[derive(Parser, Debug)]
#[command(author, version, about = "A terminal calendar for planning calisthenics workouts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Directory holding config.toml (overrides CALISTHENICS_CONFIG_DIR)
    #[arg(long)]
    config_dir: Option<PathBuf>,
    /// Date the calendar cursor starts on (YYYY-MM-DD or "today")
    #[arg(long, value_parser = parse_start_date)]
    date: Option<NaiveDate>,
    /// Log file location (defaults to cal-tui.log in the temp directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completion scripts
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_start_date(s: &str) -> Result<NaiveDate, String> {
    if s.trim().eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    parse_calendar_date(s).map_err(|e| e.to_string())
}

// The terminal is in raw mode while the app runs, so logs go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "cal-tui", &mut io::stdout());
        return Ok(());
    }

    let log_path = cli
        .log_file
        .unwrap_or_else(|| std::env::temp_dir().join("cal-tui.log"));
    init_logging(&log_path)?;

    // Initialize the library service once, before any UI exists
    let service = match &cli.config_dir {
        Some(dir) => TrackerService::initialize_in(dir),
        None => TrackerService::initialize(),
    }
    .context("Failed to initialize the workout tracker")?;
    info!(config = %service.get_config_path().display(), "starting cal-tui");

    let start_date = cli.date.unwrap_or_else(|| Local::now().date_naive());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run it
    let mut app = App::new(service, start_date);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("{err:?}");
        eprintln!("Error: {err:?}"); // Print errors to stderr
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Re-project events if the store changed since the last frame
        app.refresh_data();

        terminal.draw(|f| ui::render_ui(f, app))?;

        // Poll with a timeout so expired status messages get cleared
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events
                if key.kind == KeyEventKind::Press {
                    app.handle_key_event(key)?;
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
