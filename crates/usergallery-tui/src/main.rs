//! usergallery - a terminal directory of randomly generated users.
//!
//! Fetches one batch of users from randomuser.me at start-up, shows them as
//! cards, opens a detail modal with next/previous navigation, and filters
//! the cards by an exact name search.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use usergallery_core::view::html;
use usergallery_core::{ApiClient, Config, FetchRequest, GalleryController};

use app::{App, AppState};
use ui::input::{handle_input, handle_mouse};
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file written under the user cache directory
const LOG_FILE: &str = "usergallery.log";

/// Page title used by the HTML dump
const PAGE_TITLE: &str = "Random User Directory";

/// Initialize the tracing subscriber for logging.
///
/// The terminal belongs to the UI, so events go to a log file. The returned
/// guard flushes the non-blocking writer when dropped.
fn init_tracing() -> WorkerGuard {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = Config::log_dir().unwrap_or_else(|_| std::env::temp_dir());
    let log_dir = match std::fs::create_dir_all(&log_dir) {
        Ok(()) => log_dir,
        Err(_) => PathBuf::from("."),
    };

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    guard
}

/// Command line modes
enum Command {
    /// Run the terminal UI
    Interactive,
    /// Fetch once and print the rendered page, optionally with a modal open
    DumpHtml { open: Option<String> },
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args.first().map(String::as_str) {
        None => Ok(Command::Interactive),
        Some("--dump-html") => match (args.get(1).map(String::as_str), args.get(2)) {
            (None, _) => Ok(Command::DumpHtml { open: None }),
            (Some("--open"), Some(name)) => Ok(Command::DumpHtml {
                open: Some(name.clone()),
            }),
            (Some("--open"), None) => Err(anyhow::anyhow!("--open requires a \"First Last\" name")),
            (Some(other), _) => Err(anyhow::anyhow!("Unknown option: {}", other)),
        },
        Some(other) => Err(anyhow::anyhow!(
            "Unknown argument: {}\nUsage: usergallery [--dump-html [--open \"First Last\"]]",
            other
        )),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Command::DumpHtml { open } = parse_args(&args)? {
        return dump_html(open.as_deref()).await;
    }

    info!("usergallery starting");

    // Build the app before touching the terminal so config errors print normally
    let mut app = App::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Kick off the one-shot fetch
    app.start_load();

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("usergallery shutting down");
    Ok(())
}

/// Fetch one batch and print the rendered page to stdout
async fn dump_html(open: Option<&str>) -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        Config::default()
    });
    let api = ApiClient::from_config(&config)?;

    eprintln!("Fetching {} users...", config.results);

    let mut gallery = GalleryController::new();
    match api.fetch_users(&FetchRequest::from(&config)).await {
        Ok(users) => {
            gallery.on_loaded(users);
        }
        Err(e) => {
            gallery.on_load_failed(&e);
            return Err(e);
        }
    }

    if let Some(name) = open {
        if !gallery.open_by_name(name) {
            eprintln!("Warning: no user named {:?}", name);
        }
    }

    println!("{}", html::render_page(gallery.view(), PAGE_TITLE));
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        let size = terminal.size()?;
        app.viewport = Rect::new(0, 0, size.width, size.height);

        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout so the pending fetch can land
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Ctrl+C to quit
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }

                    if handle_input(app, key)? {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse(app, mouse)?;
                }
                _ => {}
            }
        }

        // Check for the completed fetch
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
