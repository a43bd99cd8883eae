//! Terminal User Interface (TUI) for ultifocus.
//!
//! Hosts a focus session full screen. Built with ratatui and crossterm.

mod app;
mod event;
mod prompt;
mod ui;

pub use app::{App, Screen};
pub use event::{translate, Input};
pub use prompt::TerminalPrompter;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::warn;

use crate::config::Config;
use crate::core::SystemClock;
use crate::error::FocusError;
use crate::features::focus::{FocusLock, SessionOutcome};
use crate::platform::{Platform, TerminalPlatform};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run a lock session on this terminal until it completes or is exited.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to. The
/// session is ended and the terminal restored before returning.
pub fn run_lock(
    config: &Config,
    duration_seconds: u64,
    user_agent: Option<String>,
) -> Result<SessionOutcome, FocusError> {
    let platform = TerminalPlatform::stdout(user_agent);
    let prompter = TerminalPrompter::new();
    let lock = FocusLock::new(platform, prompter.clone(), config.lock_options());

    with_terminal(false, |terminal| {
        let mut app = App::lock(lock, duration_seconds)?;
        drive(terminal, &mut app, Some(&prompter))
    })
}

/// Run a standard session; `q` ends it early.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub fn run_standard(config: &Config, duration_seconds: u64) -> Result<SessionOutcome, FocusError> {
    with_terminal(true, |terminal| {
        let mut app: App<TerminalPlatform<Stdout>> =
            App::standard(duration_seconds, SystemClock, config.rewards);
        drive(terminal, &mut app, None)
    })
}

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Set up raw mode (and the alternate screen if asked), run `body`, and
/// restore the terminal whatever happens.
fn with_terminal<T>(
    alternate_screen: bool,
    body: impl FnOnce(&mut Term) -> Result<T, FocusError>,
) -> Result<T, FocusError> {
    enable_raw_mode()
        .map_err(|e| FocusError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    if alternate_screen {
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| FocusError::Terminal(format!("Failed to setup terminal: {e}")))?;
    }

    let result = Terminal::new(CrosstermBackend::new(stdout))
        .map_err(|e| FocusError::Terminal(format!("Failed to create terminal: {e}")))
        .and_then(|mut terminal| body(&mut terminal));

    // Restore terminal
    disable_raw_mode().ok();
    if alternate_screen {
        execute!(io::stdout(), LeaveAlternateScreen).ok();
    }
    execute!(io::stdout(), Show).ok();

    result
}

/// Drive the session to its end, abandoning it if the terminal fails.
fn drive<P: Platform>(
    terminal: &mut Term,
    app: &mut App<P>,
    prompter: Option<&TerminalPrompter>,
) -> Result<SessionOutcome, FocusError> {
    terminal
        .clear()
        .map_err(|e| FocusError::Terminal(format!("Failed to clear: {e}")))?;

    match run_app(terminal, app, prompter) {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            if app.abandon().is_some() {
                warn!("session abandoned after terminal failure");
            }
            Err(e)
        }
    }
}

/// Run the main application loop.
fn run_app<P: Platform>(
    terminal: &mut Term,
    app: &mut App<P>,
    prompter: Option<&TerminalPrompter>,
) -> Result<SessionOutcome, FocusError> {
    loop {
        if app.take_needs_clear() {
            terminal
                .clear()
                .map_err(|e| FocusError::Terminal(format!("Failed to clear: {e}")))?;
        }

        let screen = app.screen();
        terminal
            .draw(|frame| ui::render(frame, &screen))
            .map_err(|e| FocusError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(input) = event::poll_input(POLL_INTERVAL)? {
            if let Some(outcome) = app.handle_input(input) {
                return Ok(outcome);
            }
        }

        // Focus changes swallowed by a dialog still count.
        let deferred = prompter.map(TerminalPrompter::take_deferred).unwrap_or_default();
        for input in deferred.iter().filter_map(translate) {
            if let Some(outcome) = app.handle_input(input) {
                return Ok(outcome);
            }
        }

        if let Some(outcome) = app.tick() {
            return Ok(outcome);
        }
    }
}
