//! Application state for the TUI.

use tracing::info;
use uuid::Uuid;

use crate::config::RewardConfig;
use crate::core::Clock;
use crate::error::FocusError;
use crate::features::focus::{
    EndReason, FocusLock, PageEvent, RewardPreview, SessionMode, SessionOutcome,
    SessionTimerView, Shortcut,
};
use crate::features::focus::session::timestamp;
use crate::platform::Platform;
use crate::tui::event::Input;

/// Everything the UI needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub mode: SessionMode,
    /// Remaining time as MM:SS.
    pub remaining: String,
    pub progress: f64,
    pub rewards: RewardPreview,
    /// Counted only in lock mode.
    pub exit_attempts: Option<u32>,
    pub status: Option<String>,
}

/// A session without lock mode; `q` ends it.
pub struct StandardSession {
    id: String,
    view: SessionTimerView,
    clock: Box<dyn Clock>,
}

impl StandardSession {
    fn finish(&self, reason: EndReason, rewards: &RewardConfig) -> SessionOutcome {
        let now_ms = self.clock.now_ms();
        info!(session = %self.id, %reason, "standard session ended");
        SessionOutcome {
            session_id: self.id.clone(),
            mode: SessionMode::Standard,
            reason,
            started_at: timestamp(self.view.start_time_ms),
            ended_at: timestamp(now_ms),
            duration_seconds: self.view.duration_seconds,
            elapsed_seconds: self.view.elapsed_seconds(now_ms),
            exit_attempts: 0,
            rewards: reason
                .earns_rewards()
                .then(|| self.view.reward_preview(rewards)),
        }
    }
}

enum Session<P: Platform> {
    Lock(FocusLock<P>),
    Standard(StandardSession),
}

/// Application state.
pub struct App<P: Platform> {
    session: Session<P>,
    rewards: RewardConfig,
    /// Status message to display.
    pub status: Option<String>,
    /// A dialog was drawn over the UI; the next frame must repaint fully.
    needs_clear: bool,
}

impl<P: Platform> App<P> {
    /// Start a lock session and wrap it.
    ///
    /// # Errors
    ///
    /// Returns an error if the controller refuses to start.
    pub fn lock(mut lock: FocusLock<P>, duration_seconds: u64) -> Result<Self, FocusError> {
        lock.start(duration_seconds)?;
        let rewards = lock.options().rewards;
        Ok(Self {
            session: Session::Lock(lock),
            rewards,
            status: Some("Lock mode on. Esc: emergency exit".to_string()),
            needs_clear: true,
        })
    }

    /// Start a standard session.
    pub fn standard(
        duration_seconds: u64,
        clock: impl Clock + 'static,
        rewards: RewardConfig,
    ) -> Self {
        let view = SessionTimerView::new(clock.now_ms(), duration_seconds, SessionMode::Standard);
        let id = Uuid::new_v4().to_string();
        info!(session = %id, duration_seconds, "standard session started");

        Self {
            session: Session::Standard(StandardSession {
                id,
                view,
                clock: Box::new(clock),
            }),
            rewards,
            status: None,
            needs_clear: false,
        }
    }

    /// The lock controller, in lock mode.
    pub const fn focus_lock(&self) -> Option<&FocusLock<P>> {
        match &self.session {
            Session::Lock(lock) => Some(lock),
            Session::Standard(_) => None,
        }
    }

    /// Apply one input. Returns the outcome if the session ended.
    pub fn handle_input(&mut self, input: Input) -> Option<SessionOutcome> {
        match &mut self.session {
            Session::Lock(lock) => match input {
                Input::Page(event) => {
                    let response = lock.handle_event(event);
                    if response.is_prevented() {
                        self.status = Some(blocked_message(event, lock.exit_attempts()));
                    }
                    None
                }
                Input::EmergencyExit => {
                    self.needs_clear = true;
                    if lock.request_emergency_exit() {
                        lock.take_last_outcome()
                    } else {
                        self.status = Some("Emergency exit cancelled. Stay focused!".to_string());
                        None
                    }
                }
                Input::Quit => {
                    self.status =
                        Some("Lock mode is on. Press Esc for an emergency exit.".to_string());
                    None
                }
            },
            Session::Standard(session) => match input {
                Input::Quit | Input::EmergencyExit | Input::Page(PageEvent::BeforeUnload) => {
                    Some(session.finish(EndReason::UserEnded, &self.rewards))
                }
                Input::Page(_) => None,
            },
        }
    }

    /// Advance time-driven work. Returns the outcome if the session ended.
    pub fn tick(&mut self) -> Option<SessionOutcome> {
        match &mut self.session {
            Session::Lock(lock) => {
                if lock.tick() {
                    self.needs_clear = true;
                }
                if lock.is_active() && lock.time_remaining() == 0 {
                    return lock.end(EndReason::Completed);
                }
                None
            }
            Session::Standard(session) => session
                .view
                .is_complete(session.clock.now_ms())
                .then(|| session.finish(EndReason::Completed, &self.rewards)),
        }
    }

    /// End a lock session that is still running, e.g. after a draw error.
    pub fn abandon(&mut self) -> Option<SessionOutcome> {
        match &mut self.session {
            Session::Lock(lock) if lock.is_active() => lock.end(EndReason::UserEnded),
            _ => None,
        }
    }

    /// Whether a dialog was shown since the last call.
    pub fn take_needs_clear(&mut self) -> bool {
        std::mem::take(&mut self.needs_clear)
    }

    /// Snapshot for rendering.
    pub fn screen(&self) -> Screen {
        let (view, now_ms, exit_attempts) = match &self.session {
            Session::Lock(lock) => (
                lock.timer_view(),
                lock.now_ms(),
                Some(lock.exit_attempts()),
            ),
            Session::Standard(session) => (Some(session.view), session.clock.now_ms(), None),
        };

        let (mode, remaining, progress) = view.map_or_else(
            || (SessionMode::Lock, "00:00".to_string(), 100.0),
            |v| (v.mode, v.format_remaining(now_ms), v.progress_percent(now_ms)),
        );

        Screen {
            mode,
            remaining,
            progress,
            rewards: RewardPreview::for_mode(mode, &self.rewards),
            exit_attempts,
            status: self.status.clone(),
        }
    }
}

fn blocked_message(event: PageEvent, attempts: u32) -> String {
    let what = match event {
        PageEvent::KeyDown(chord) => Shortcut::classify(&chord)
            .map_or_else(|| "shortcut".to_string(), |s| s.description().to_string()),
        PageEvent::BeforeUnload => "quit".to_string(),
        PageEvent::ContextMenu => "context menu".to_string(),
        PageEvent::VisibilityChange(_) => "leaving".to_string(),
    };
    format!("Blocked {what} ({attempts} exit attempts)")
}
