//! UltiFocus lock mode.
//!
//! - [`FocusLock`] owns the session and every host side effect
//! - [`SessionTimerView`] projects a session onto a countdown
//! - Host events come in as [`PageEvent`]s and are answered with an
//!   [`EventResponse`]

pub mod events;
pub mod listeners;
pub mod lock;
pub mod notify;
pub mod prompt;
pub mod reward;
pub mod session;
pub mod timer;

pub use events::{EventResponse, Key, KeyChord, PageEvent, Shortcut, Visibility};
pub use listeners::{ListenerSet, Subscription};
pub use lock::{FocusLock, LockModeFlag, LockOptions};
pub use notify::{LogNotifier, Notification, Notifier, QueueNotifier};
pub use prompt::{
    Prompter, ScriptedPrompter, EMERGENCY_CONFIRM, EMERGENCY_FINAL_WARNING, STAY_FOCUSED_ALERT,
};
pub use reward::RewardPreview;
pub use session::{EndReason, LockSession, SessionMode, SessionOutcome};
pub use timer::{
    format_duration, format_duration_mmss, parse_duration, render_progress_bar, seconds,
    SessionTimerView,
};
