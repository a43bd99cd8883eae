//! Host platform abstraction.
//!
//! The focus-lock core never touches a display, input device, or OS service
//! directly. Everything it needs from the host goes through [`Platform`]:
//! - Environment signals (user agent, feature support)
//! - Screen wake lock, vibration, orientation lock
//! - Fullscreen capture
//! - Scroll and text-selection suppression
//! - Installation of lock guards (which events the host should intercept)
//!
//! Every fallible call returns a [`PlatformError`] so an unsupported feature
//! is an explicit value instead of a missing method.

mod simulated;
mod terminal;

pub use simulated::{PlatformCall, SimulatedPlatform};
pub use terminal::TerminalPlatform;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a platform call did not take effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The host has no such capability.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    /// The host has the capability but refused the request.
    #[error("{feature} request was denied: {reason}")]
    Denied {
        /// Feature that was requested.
        feature: &'static str,
        /// Host-provided reason.
        reason: String,
    },

    /// The request was attempted and failed.
    #[error("{feature} failed: {reason}")]
    Failed {
        /// Feature that was requested.
        feature: &'static str,
        /// Host-provided reason.
        reason: String,
    },
}

/// Which optional features the host exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSupport {
    /// Fullscreen capture is available.
    pub fullscreen: bool,
    /// A screen wake lock can be requested.
    pub wake_lock: bool,
    /// Haptic feedback is available.
    pub vibration: bool,
    /// Screen orientation can be locked.
    pub orientation_lock: bool,
}

/// Screen orientation to lock to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Portrait (used by lock sessions).
    Portrait,
    /// Landscape.
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

/// Opaque handle to an acquired screen wake lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WakeLockHandle(pub u64);

/// A class of events the host intercepts while a lock session is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockGuard {
    /// Leaving or closing the page.
    BeforeUnload,
    /// The page becoming hidden or visible.
    VisibilityChange,
    /// Context menu (right click, long press).
    ContextMenu,
    /// Escape-oriented keyboard shortcuts.
    KeyboardShortcuts,
}

impl LockGuard {
    /// Every guard a lock session installs, in installation order.
    pub const ALL: [Self; 4] = [
        Self::BeforeUnload,
        Self::VisibilityChange,
        Self::ContextMenu,
        Self::KeyboardShortcuts,
    ];
}

/// Capability provider for one host runtime.
pub trait Platform {
    /// User-agent style description of the runtime.
    fn user_agent(&self) -> String;

    /// Optional features available on this host.
    fn features(&self) -> FeatureSupport;

    /// Acquire a screen wake lock.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` or `Denied` when no lock was acquired.
    fn request_wake_lock(&mut self) -> Result<WakeLockHandle, PlatformError>;

    /// Release a previously acquired wake lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the release.
    fn release_wake_lock(&mut self, handle: WakeLockHandle) -> Result<(), PlatformError>;

    /// Play a vibration pattern (alternating on/off milliseconds).
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` when the host cannot vibrate.
    fn vibrate(&mut self, pattern: &[u32]) -> Result<(), PlatformError>;

    /// Toggle the fixed-viewport scroll lock.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Toggle user text-selection suppression.
    fn set_text_selection_locked(&mut self, locked: bool);

    /// Lock the screen orientation.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` or `Denied` when the lock was not applied.
    fn lock_orientation(&mut self, orientation: Orientation) -> Result<(), PlatformError>;

    /// Release the orientation lock.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` when the host has no orientation lock.
    fn unlock_orientation(&mut self) -> Result<(), PlatformError>;

    /// Enter fullscreen.
    ///
    /// # Errors
    ///
    /// Returns an error if fullscreen could not be entered.
    fn enter_fullscreen(&mut self) -> Result<(), PlatformError>;

    /// Leave fullscreen.
    ///
    /// # Errors
    ///
    /// Returns an error if fullscreen could not be left.
    fn exit_fullscreen(&mut self) -> Result<(), PlatformError>;

    /// Whether the host is currently fullscreen.
    fn is_fullscreen(&self) -> bool;

    /// Start intercepting a class of events.
    fn install_guard(&mut self, guard: LockGuard);

    /// Stop intercepting a class of events.
    fn remove_guard(&mut self, guard: LockGuard);
}
