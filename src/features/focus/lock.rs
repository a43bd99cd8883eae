//! The UltiFocus lock controller.
//!
//! [`FocusLock`] owns the single lock session of a process and every side
//! effect it applies to the host. States are `Idle -> Active -> Idle`; there
//! is no pause. The only user-initiated way out before the timer elapses is
//! [`FocusLock::request_emergency_exit`], which needs two confirmations.
//!
//! Host calls made during start and end are best effort: failures are logged
//! and the transition still completes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::events::{EventResponse, PageEvent, Shortcut, Visibility};
use super::listeners::{ListenerSet, Subscription};
use super::notify::{LogNotifier, Notification, Notifier};
use super::prompt::{Prompter, EMERGENCY_CONFIRM, EMERGENCY_FINAL_WARNING, STAY_FOCUSED_ALERT};
use super::reward::RewardPreview;
use super::session::{timestamp, EndReason, LockSession, SessionMode, SessionOutcome};
use super::timer::{format_duration, seconds, SessionTimerView};
use crate::config::RewardConfig;
use crate::core::{Clock, DeviceCapabilities, DeviceInfo, SystemClock};
use crate::error::FocusError;
use crate::features::mobile::{MobileOptimizer, VibrationKind};
use crate::platform::{LockGuard, Orientation, Platform};

/// Controller settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOptions {
    /// Delay before the desktop "stay focused" reminder, in ms.
    pub stay_focused_alert_delay_ms: u64,
    pub vibration: bool,
    pub notifications: bool,
    pub rewards: RewardConfig,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            stay_focused_alert_delay_ms: 1000,
            vibration: true,
            notifications: true,
            rewards: RewardConfig::default(),
        }
    }
}

/// Process-wide "lock mode active" flag.
///
/// The controller sets and clears it; other subsystems (for example a
/// notification blocker) hold clones and read it.
#[derive(Debug, Clone, Default)]
pub struct LockModeFlag(Arc<AtomicBool>);

impl LockModeFlag {
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn set(&self, active: bool) {
        self.0.store(active, Ordering::SeqCst);
    }
}

/// Owner of the lock session and its host side effects.
pub struct FocusLock<P: Platform> {
    platform: P,
    optimizer: MobileOptimizer,
    capabilities: DeviceCapabilities,
    prompter: Box<dyn Prompter>,
    notifier: Box<dyn Notifier>,
    clock: Box<dyn Clock>,
    options: LockOptions,
    listeners: ListenerSet,
    flag: LockModeFlag,
    session: Option<LockSession>,
    exit_attempts: u32,
    pending_alert_at: Option<i64>,
    notifications_allowed: Option<bool>,
    last_outcome: Option<SessionOutcome>,
}

impl<P: Platform> FocusLock<P> {
    /// Create an idle controller using the system clock and logging
    /// notifier.
    pub fn new(platform: P, prompter: impl Prompter + 'static, options: LockOptions) -> Self {
        let mut optimizer = MobileOptimizer::new();
        optimizer.set_vibration_enabled(options.vibration);

        Self {
            platform,
            optimizer,
            capabilities: DeviceCapabilities::new(),
            prompter: Box::new(prompter),
            notifier: Box::new(LogNotifier),
            clock: Box::new(SystemClock),
            options,
            listeners: ListenerSet::new(),
            flag: LockModeFlag::default(),
            session: None,
            exit_attempts: 0,
            pending_alert_at: None,
            notifications_allowed: None,
            last_outcome: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Share an existing lock-mode flag instead of the controller's own.
    #[must_use]
    pub fn with_flag(mut self, flag: LockModeFlag) -> Self {
        self.flag = flag;
        self
    }

    pub const fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub const fn options(&self) -> &LockOptions {
        &self.options
    }

    /// Device classification, computed on first use.
    pub fn device_info(&self) -> &DeviceInfo {
        self.capabilities.detect(&self.platform)
    }

    /// A handle to the lock-mode flag.
    pub fn lock_mode_flag(&self) -> LockModeFlag {
        self.flag.clone()
    }

    /// Register a listener called with `true` on activation and `false` on
    /// deactivation.
    pub fn on_change(&self, listener: impl FnMut(bool) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }

    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub const fn session(&self) -> Option<&LockSession> {
        self.session.as_ref()
    }

    pub const fn exit_attempts(&self) -> u32 {
        self.exit_attempts
    }

    /// Countdown view over the active session.
    pub fn timer_view(&self) -> Option<SessionTimerView> {
        self.session.as_ref().map(SessionTimerView::for_lock_session)
    }

    /// Seconds left in the active session, zero when idle.
    pub fn time_remaining(&self) -> u64 {
        self.timer_view()
            .map_or(0, |view| view.time_remaining(self.clock.now_ms()))
    }

    /// Percentage of the active session elapsed, zero when idle.
    pub fn progress_percent(&self) -> f64 {
        self.timer_view()
            .map_or(0.0, |view| view.progress_percent(self.clock.now_ms()))
    }

    /// Current wall-clock time as seen by the controller.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Outcome of the most recently ended session, removed on read.
    pub fn take_last_outcome(&mut self) -> Option<SessionOutcome> {
        self.last_outcome.take()
    }

    /// Begin a lock session.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyActive` if a session is running (the running session
    /// is left untouched) and `InvalidArgument` for a zero duration.
    pub fn start(&mut self, duration_seconds: u64) -> Result<&LockSession, FocusError> {
        if let Some(session) = &self.session {
            return Err(FocusError::AlreadyActive(session.id.clone()));
        }
        if duration_seconds == 0 {
            return Err(FocusError::InvalidArgument(
                "session duration must be at least one second".to_string(),
            ));
        }

        let start_time_ms = self.clock.now_ms();
        self.exit_attempts = 0;
        self.pending_alert_at = None;
        let is_mobile = self.device_info().is_mobile_or_tablet();

        if is_mobile {
            self.optimizer.request_wake_lock(&mut self.platform);
            self.optimizer.prevent_scrolling(&mut self.platform);
            self.optimizer.prevent_text_selection(&mut self.platform);
            self.optimizer
                .lock_orientation(&mut self.platform, Orientation::Portrait);
            self.optimizer
                .vibrate_pattern(&mut self.platform, VibrationKind::Success);
        }

        if let Err(e) = self.platform.enter_fullscreen() {
            warn!("could not enter fullscreen: {e}");
        }

        for guard in LockGuard::ALL {
            self.platform.install_guard(guard);
        }

        let session = LockSession {
            id: Uuid::new_v4().to_string(),
            start_time_ms,
            duration_seconds,
            is_active: true,
            is_mobile_platform: is_mobile,
        };
        info!(
            session = %session.id,
            duration_seconds,
            mobile = is_mobile,
            "lock session started"
        );
        self.session = Some(session);
        self.flag.set(true);
        self.listeners.notify(true);

        let length = format_duration(seconds(duration_seconds));
        self.show_notification(&Notification::new(
            "UltiFocus Lock Mode Activated",
            format!("Stay focused for {length}. Leaving early forfeits your rewards."),
        ));

        self.session
            .as_ref()
            .ok_or_else(|| FocusError::NotFound("lock session".to_string()))
    }

    /// End the active session and undo everything `start` applied.
    ///
    /// Returns `None` (and logs a warning) when no session is active.
    pub fn end(&mut self, reason: EndReason) -> Option<SessionOutcome> {
        let Some(session) = self.session.take() else {
            warn!(%reason, "end requested with no active lock session");
            return None;
        };

        let now_ms = self.clock.now_ms();
        let view = SessionTimerView::for_lock_session(&session);

        for guard in LockGuard::ALL.iter().rev() {
            self.platform.remove_guard(*guard);
        }
        self.pending_alert_at = None;

        if let Err(e) = self.platform.exit_fullscreen() {
            warn!("could not exit fullscreen: {e}");
        }

        if session.is_mobile_platform {
            self.optimizer.cleanup(&mut self.platform);
            let kind = if reason == EndReason::Completed {
                VibrationKind::Success
            } else {
                VibrationKind::Warning
            };
            self.optimizer.vibrate_pattern(&mut self.platform, kind);
        }

        self.flag.set(false);
        self.listeners.notify(false);

        let rewards = reason
            .earns_rewards()
            .then(|| RewardPreview::for_mode(SessionMode::Lock, &self.options.rewards));
        self.show_notification(&end_notification(reason, rewards.as_ref()));

        let outcome = SessionOutcome {
            session_id: session.id,
            mode: SessionMode::Lock,
            reason,
            started_at: timestamp(session.start_time_ms),
            ended_at: timestamp(now_ms),
            duration_seconds: session.duration_seconds,
            elapsed_seconds: view.elapsed_seconds(now_ms),
            exit_attempts: self.exit_attempts,
            rewards,
        };
        self.exit_attempts = 0;

        info!(
            session = %outcome.session_id,
            %reason,
            exit_attempts = outcome.exit_attempts,
            "lock session ended"
        );
        self.last_outcome = Some(outcome.clone());
        Some(outcome)
    }

    /// Record an escape attempt.
    pub fn increment_exit_attempts(&mut self) {
        self.exit_attempts = self.exit_attempts.saturating_add(1);
        debug!(attempts = self.exit_attempts, "exit attempt");

        if self.session.as_ref().is_some_and(|s| s.is_mobile_platform) {
            self.optimizer
                .vibrate_pattern(&mut self.platform, VibrationKind::Warning);
        }
    }

    /// Ask the user, twice, whether to abandon the session.
    ///
    /// Returns `true` only if both confirmations were accepted and the
    /// session ended.
    pub fn request_emergency_exit(&mut self) -> bool {
        if self.session.is_none() {
            warn!("emergency exit requested with no active lock session");
            return false;
        }

        self.increment_exit_attempts();

        if !self.prompter.confirm(EMERGENCY_CONFIRM) {
            info!("emergency exit declined at first confirmation");
            return false;
        }
        if !self.prompter.confirm(EMERGENCY_FINAL_WARNING) {
            info!("emergency exit declined at final warning");
            return false;
        }

        self.end(EndReason::Emergency).is_some()
    }

    /// React to a host event while the lock guards are installed.
    pub fn handle_event(&mut self, event: PageEvent) -> EventResponse {
        let Some(is_mobile) = self.session.as_ref().map(|s| s.is_mobile_platform) else {
            return EventResponse::Pass;
        };

        match event {
            PageEvent::BeforeUnload => {
                self.increment_exit_attempts();
                EventResponse::Prevent
            }
            PageEvent::VisibilityChange(Visibility::Hidden) => {
                self.increment_exit_attempts();
                if !is_mobile {
                    let delay = i64::try_from(self.options.stay_focused_alert_delay_ms)
                        .unwrap_or(i64::MAX);
                    self.pending_alert_at = Some(self.clock.now_ms().saturating_add(delay));
                }
                EventResponse::Pass
            }
            PageEvent::VisibilityChange(Visibility::Visible) => {
                if is_mobile {
                    self.optimizer.vibrate_short(&mut self.platform);
                }
                EventResponse::Pass
            }
            PageEvent::ContextMenu => EventResponse::Prevent,
            PageEvent::KeyDown(chord) => match Shortcut::classify(&chord) {
                Some(shortcut) => {
                    debug!(%shortcut, "blocked shortcut");
                    self.increment_exit_attempts();
                    EventResponse::Prevent
                }
                None => EventResponse::Pass,
            },
        }
    }

    /// Run scheduled work; call this from the host's polling loop.
    ///
    /// Returns `true` if the "stay focused" reminder was shown.
    pub fn tick(&mut self) -> bool {
        let Some(due) = self.pending_alert_at else {
            return false;
        };
        if self.clock.now_ms() < due {
            return false;
        }
        self.pending_alert_at = None;
        if self.session.is_none() {
            return false;
        }
        self.prompter.alert(STAY_FOCUSED_ALERT);
        true
    }

    fn show_notification(&mut self, notification: &Notification) {
        if !self.options.notifications {
            return;
        }

        let allowed = *self.notifications_allowed.get_or_insert_with(|| {
            self.notifier.request_permission().unwrap_or_else(|e| {
                warn!("notification permission request failed: {e}");
                false
            })
        });
        if !allowed {
            debug!(title = %notification.title, "notification suppressed");
            return;
        }

        if let Err(e) = self.notifier.notify(notification) {
            warn!("failed to show notification: {e}");
        }
    }
}

impl<P: Platform> Drop for FocusLock<P> {
    fn drop(&mut self) {
        if self.session.is_some() {
            warn!("lock controller dropped with an active session");
            self.end(EndReason::UserEnded);
        }
    }
}

fn end_notification(reason: EndReason, rewards: Option<&RewardPreview>) -> Notification {
    match reason {
        EndReason::Completed => Notification::new(
            "Session Complete!",
            rewards.map_or_else(
                || "Great job staying focused.".to_string(),
                |r| format!("Great job staying focused. {}", r.label()),
            ),
        ),
        EndReason::UserEnded => {
            Notification::new("Session Ended", "Your focus session was ended early.")
        }
        EndReason::Emergency => Notification::new(
            "Emergency Exit",
            "Lock mode ended. Progress from this session was forfeited.",
        ),
    }
}
