//! Lead Funnel TUI - terminal lead capture funnel for IUL insurance
//!
//! A Ratatui-based landing page with a three-step lead form that posts
//! completed leads to a capture endpoint.

mod app;
mod config;
mod lead;
mod state;
mod ui;
mod zip_lookup;

use anyhow::Result;
use app::App;
use config::FunnelConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log file name inside the data directory
const LOG_FILE: &str = "lead-funnel-tui.log";

/// Where log lines go. The UI owns the terminal, so prefer a file.
fn log_writer() -> BoxMakeWriter {
    let file = FunnelConfig::log_dir().and_then(|dir| {
        fs::create_dir_all(&dir).ok()?;
        File::options()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE))
            .ok()
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
                .unwrap_or_else(|_| "lead_funnel_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer()),
        )
        .init();

    let config = FunnelConfig::load()?;
    tracing::debug!(
        prefixes = zip_lookup::mapped_prefix_count(),
        "ZIP3 lookup table loaded"
    );
    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("Exiting with error: {err:?}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app, now))?;

        // Faster polling while something is moving (16ms = ~60fps)
        let animating = !app.state.progress.is_settled(now)
            || app.form.pending_advance().is_some()
            || app.form.is_submitting();
        let poll_duration = if animating {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        // Handle crossterm events
        if event::poll(poll_duration)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }

                    app.handle_key(key)?;
                }
                Event::Resize(_width, _height) => {
                    // Layout is recomputed on the next draw
                }
                _ => {}
            }
        }

        // Yield so background submissions make progress
        tokio::task::yield_now().await;

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
