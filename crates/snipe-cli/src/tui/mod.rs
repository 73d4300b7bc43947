//! Snipe TUI
//!
//! Terminal dashboard for the course-section sniper.
//!
//! ## Layout
//!
//! - Top: course-name input and the add control
//! - Middle: task table (Course, Section, Status, Enabled, Delete)
//! - Bottom: status bar
//!
//! ## Keys
//!
//! - a or /: Type a course name, Enter to snipe, Esc to leave the input
//! - j/k or ↑/↓: Move selection up/down
//! - space or t: Toggle monitoring of the selected section
//! - d: Delete every section of the selected course
//! - r: Refresh
//! - ?: Help
//! - q: Quit

mod app;
mod surface;
mod ui;

use std::fs::File;
use std::future::Future;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use snipe_core::{Config, HttpBackend, SyncClient};

use app::{App, InputMode};
use surface::UiEvent;

/// Run the TUI application
pub async fn run(config: Config) -> Result<()> {
    // Initialize TUI logging (file-based, only if SNIPE_LOG is set)
    init_tui_logging(&config);

    let backend =
        HttpBackend::from_config(&config).context("Failed to set up task service client")?;
    let (surface, ui_rx) = surface::channel();
    let client = Arc::new(SyncClient::new(Arc::new(backend), Arc::new(surface)));

    info!("Starting TUI against {}", config.api_url);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new();

    // Initial load
    spawn_action(&client, |client| async move {
        client.refresh().await;
    });

    let result = run_app(&mut terminal, &mut app, &client, ui_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &Arc<SyncClient>,
    mut ui_rx: UnboundedReceiver<UiEvent>,
) -> Result<()> {
    loop {
        // Check for status message timeout
        app.check_status_timeout();

        // Draw UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::select! {
            biased;

            // Updates from in-flight actions
            Some(event) = ui_rx.recv() => {
                app.apply(event);
            }

            // Poll for terminal events
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        // Only handle key press events (not release)
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        handle_key(app, client, key.code, key.modifiers);
                    }
                }
            }
        }

        if app.should_quit {
            // Unanswered questions resolve as "no"
            while !app.confirms.is_empty() {
                app.answer_confirm(false);
            }
            break;
        }
    }

    Ok(())
}

/// Route a key press
///
/// Modals take the key first: a pending confirmation, then an alert, then
/// the help overlay.
fn handle_key(app: &mut App, client: &Arc<SyncClient>, code: KeyCode, modifiers: KeyModifiers) {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if !app.confirms.is_empty() {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_confirm(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_confirm(false),
            _ => {}
        }
        return;
    }

    // If an alert is showing, any key dismisses it
    if !app.alerts.is_empty() {
        app.dismiss_alert();
        return;
    }

    // If help is showing, any key dismisses it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, client, code),
        InputMode::Editing => handle_editing_mode(app, client, code),
    }
}

/// Handle key events in normal mode
fn handle_normal_mode(app: &mut App, client: &Arc<SyncClient>, code: KeyCode) {
    match code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('g') | KeyCode::Home => app.move_to_first(),
        KeyCode::Char('G') | KeyCode::End => app.move_to_last(),
        KeyCode::Char('a') | KeyCode::Char('/') => app.enter_editing(),
        KeyCode::Char(' ') | KeyCode::Char('t') => {
            if let Some(id) = app.toggle_current() {
                debug!("Toggling task {}", id);
                spawn_action(client, move |client| async move {
                    client.toggle_enabled(id).await;
                });
            }
        }
        KeyCode::Char('d') => {
            if let Some(course) = app.current_course() {
                spawn_action(client, move |client| async move {
                    client.delete_course(&course).await;
                });
            }
        }
        KeyCode::Char('r') => {
            app.set_status("Refreshing...");
            spawn_action(client, |client| async move {
                client.refresh().await;
            });
        }
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
}

/// Handle key events while typing a course name
fn handle_editing_mode(app: &mut App, client: &Arc<SyncClient>, code: KeyCode) {
    match code {
        KeyCode::Esc => app.exit_editing(),
        KeyCode::Enter => {
            if let Some(course) = app.submit_course() {
                spawn_action(client, move |client| async move {
                    client.search_and_add(&course).await;
                });
            }
        }
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

/// Run a client operation on its own task
///
/// Results reach the app through the surface channel, so nothing is awaited
/// here and further keys are handled while the request is in flight.
fn spawn_action<F, Fut>(client: &Arc<SyncClient>, action: F)
where
    F: FnOnce(Arc<SyncClient>) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(action(Arc::clone(client)));
}

/// Initialize file-based logging for TUI mode
///
/// Only enabled if SNIPE_LOG environment variable is set.
/// Logs to the configured log file or `<data_dir>/debug.log`.
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("SNIPE_LOG") else {
        return;
    };

    let log_path = config.log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!("snipe_core={},snipe={}", log_level, log_level));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();
}
