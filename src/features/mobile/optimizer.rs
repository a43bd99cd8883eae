//! Mobile environment adjustments applied during lock sessions.
//!
//! Every operation is fail-soft: an unsupported or rejected host call is
//! logged and reported as `false`, never as an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::platform::{Orientation, Platform, PlatformError, WakeLockHandle};

/// Single short pulse.
pub const VIBRATE_SHORT: [u32; 1] = [50];
/// Single medium pulse.
pub const VIBRATE_MEDIUM: [u32; 1] = [100];
/// Single long pulse.
pub const VIBRATE_LONG: [u32; 1] = [200];

/// Named vibration feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VibrationKind {
    Warning,
    Error,
    Success,
}

impl VibrationKind {
    /// On/off sequence in milliseconds.
    #[must_use]
    pub const fn pattern(self) -> &'static [u32] {
        match self {
            Self::Warning => &[100, 50, 100],
            Self::Error => &[200, 100, 200, 100, 200],
            Self::Success => &[50, 50, 50],
        }
    }
}

/// Applies and reverts mobile-specific host changes.
#[derive(Debug)]
pub struct MobileOptimizer {
    wake_lock: Option<WakeLockHandle>,
    vibration_enabled: bool,
    orientation_locked: bool,
}

impl Default for MobileOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MobileOptimizer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            wake_lock: None,
            vibration_enabled: true,
            orientation_locked: false,
        }
    }

    /// Whether a wake lock is currently held.
    #[must_use]
    pub const fn has_wake_lock(&self) -> bool {
        self.wake_lock.is_some()
    }

    #[must_use]
    pub const fn vibration_enabled(&self) -> bool {
        self.vibration_enabled
    }

    pub fn set_vibration_enabled(&mut self, enabled: bool) {
        self.vibration_enabled = enabled;
    }

    /// Keep the screen awake.
    ///
    /// Returns `true` if a lock is held afterwards. Calling while a lock is
    /// already held does nothing.
    pub fn request_wake_lock(&mut self, platform: &mut dyn Platform) -> bool {
        if self.wake_lock.is_some() {
            return true;
        }

        match platform.request_wake_lock() {
            Ok(handle) => {
                debug!(?handle, "wake lock acquired");
                self.wake_lock = Some(handle);
                true
            }
            Err(PlatformError::Unsupported(_)) => {
                warn!("wake lock not supported; screen may sleep during the session");
                false
            }
            Err(e) => {
                warn!("wake lock request failed: {e}");
                false
            }
        }
    }

    /// Release the wake lock if one is held.
    pub fn release_wake_lock(&mut self, platform: &mut dyn Platform) {
        let Some(handle) = self.wake_lock.take() else {
            return;
        };
        match platform.release_wake_lock(handle) {
            Ok(()) => debug!(?handle, "wake lock released"),
            Err(e) => warn!("wake lock release failed: {e}"),
        }
    }

    /// Play a raw vibration pattern.
    pub fn vibrate(&self, platform: &mut dyn Platform, pattern: &[u32]) -> bool {
        if !self.vibration_enabled || !platform.features().vibration {
            return false;
        }
        match platform.vibrate(pattern) {
            Ok(()) => true,
            Err(e) => {
                debug!("vibration failed: {e}");
                false
            }
        }
    }

    pub fn vibrate_short(&self, platform: &mut dyn Platform) -> bool {
        self.vibrate(platform, &VIBRATE_SHORT)
    }

    pub fn vibrate_medium(&self, platform: &mut dyn Platform) -> bool {
        self.vibrate(platform, &VIBRATE_MEDIUM)
    }

    pub fn vibrate_long(&self, platform: &mut dyn Platform) -> bool {
        self.vibrate(platform, &VIBRATE_LONG)
    }

    pub fn vibrate_pattern(&self, platform: &mut dyn Platform, kind: VibrationKind) -> bool {
        self.vibrate(platform, kind.pattern())
    }

    pub fn prevent_scrolling(&self, platform: &mut dyn Platform) {
        platform.set_scroll_locked(true);
    }

    pub fn allow_scrolling(&self, platform: &mut dyn Platform) {
        platform.set_scroll_locked(false);
    }

    pub fn prevent_text_selection(&self, platform: &mut dyn Platform) {
        platform.set_text_selection_locked(true);
    }

    pub fn allow_text_selection(&self, platform: &mut dyn Platform) {
        platform.set_text_selection_locked(false);
    }

    /// Lock the screen orientation; `false` if the host cannot.
    pub fn lock_orientation(&mut self, platform: &mut dyn Platform, orientation: Orientation) -> bool {
        match platform.lock_orientation(orientation) {
            Ok(()) => {
                self.orientation_locked = true;
                true
            }
            Err(e) => {
                debug!("orientation lock to {orientation} unavailable: {e}");
                false
            }
        }
    }

    /// Release the orientation lock; no-op if none was applied.
    pub fn unlock_orientation(&mut self, platform: &mut dyn Platform) -> bool {
        if !self.orientation_locked {
            return true;
        }
        self.orientation_locked = false;
        match platform.unlock_orientation() {
            Ok(()) => true,
            Err(e) => {
                warn!("orientation unlock failed: {e}");
                false
            }
        }
    }

    /// Undo everything this optimizer may have applied.
    pub fn cleanup(&mut self, platform: &mut dyn Platform) {
        self.release_wake_lock(platform);
        self.allow_scrolling(platform);
        self.unlock_orientation(platform);
        self.allow_text_selection(platform);
    }
}
