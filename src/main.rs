//! Profile Form TUI - terminal profile form with validation and simulated submit
//!
//! A Ratatui-based TUI that registers typed fields with validation rules,
//! manages a dynamic hobby list and prints accepted records to a console panel.

mod app;
mod config;
mod platform;
mod state;
mod submit;
mod ui;

use anyhow::Result;
use app::App;
use config::TuiConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Open the log file, falling back to stderr when it cannot be created.
///
/// Writing to stderr while the alternate screen is active garbles the UI,
/// so the fallback is only useful when logs are redirected.
fn log_writer() -> BoxMakeWriter {
    let file = TuiConfig::log_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    match file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(io::stderr),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "profile_form_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer()),
        )
        .init();

    let (config, config_error) = match TuiConfig::load() {
        Ok(config) => (config, None),
        Err(e) => {
            tracing::warn!("Failed to load config, using defaults: {e}");
            (TuiConfig::default(), Some(e))
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config);
    if let Some(e) = config_error {
        app.push_error(format!("Failed to load config: {e}"));
    }
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Apply finished submissions before drawing
        app.poll_submission();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Faster polling while the submit progress bar animates (16ms = ~60fps)
        let poll_duration = if app.state.submit_status.is_submitting() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        // Blocking poll runs on the runtime thread; submit tasks use the worker pool
        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }

                app.handle_key(key)?;
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
