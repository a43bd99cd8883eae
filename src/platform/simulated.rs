//! In-memory platform that records every call.
//!
//! Used to drive the lock controller without a real display, and to assert
//! that teardown returns the host to its pre-session baseline.

use std::collections::BTreeSet;

use super::{FeatureSupport, LockGuard, Orientation, Platform, PlatformError, WakeLockHandle};

const DESKTOP_CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const IOS_SAFARI_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
const ANDROID_CHROME_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
const ANDROID_TABLET_UA: &str = "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// A call made against the simulated host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    RequestWakeLock,
    ReleaseWakeLock,
    Vibrate(Vec<u32>),
    SetScrollLocked(bool),
    SetTextSelectionLocked(bool),
    LockOrientation(Orientation),
    UnlockOrientation,
    EnterFullscreen,
    ExitFullscreen,
    InstallGuard(LockGuard),
    RemoveGuard(LockGuard),
}

/// Scriptable host with observable state.
#[derive(Debug, Clone)]
pub struct SimulatedPlatform {
    user_agent: String,
    features: FeatureSupport,
    calls: Vec<PlatformCall>,
    next_handle: u64,
    wake_lock: Option<WakeLockHandle>,
    scroll_locked: bool,
    text_selection_locked: bool,
    orientation: Option<Orientation>,
    fullscreen: bool,
    guards: BTreeSet<LockGuard>,
    /// Reject wake-lock requests with `Denied`.
    pub deny_wake_lock: bool,
    /// Reject wake-lock releases with `Failed` (the lock is still dropped).
    pub fail_wake_lock_release: bool,
    /// Reject fullscreen entry with `Denied`.
    pub deny_fullscreen: bool,
    /// Reject fullscreen exit with `Failed` (fullscreen is still left).
    pub fail_fullscreen_exit: bool,
}

impl SimulatedPlatform {
    /// Create a host with an explicit user agent and feature set.
    #[must_use]
    pub fn new(user_agent: impl Into<String>, features: FeatureSupport) -> Self {
        Self {
            user_agent: user_agent.into(),
            features,
            calls: Vec::new(),
            next_handle: 1,
            wake_lock: None,
            scroll_locked: false,
            text_selection_locked: false,
            orientation: None,
            fullscreen: false,
            guards: BTreeSet::new(),
            deny_wake_lock: false,
            fail_wake_lock_release: false,
            deny_fullscreen: false,
            fail_fullscreen_exit: false,
        }
    }

    /// Chrome on Windows.
    #[must_use]
    pub fn desktop_chrome() -> Self {
        Self::new(
            DESKTOP_CHROME_UA,
            FeatureSupport {
                fullscreen: true,
                wake_lock: true,
                vibration: false,
                orientation_lock: false,
            },
        )
    }

    /// Safari on iPhone.
    #[must_use]
    pub fn ios_safari() -> Self {
        Self::new(
            IOS_SAFARI_UA,
            FeatureSupport {
                fullscreen: false,
                wake_lock: true,
                vibration: false,
                orientation_lock: false,
            },
        )
    }

    /// Chrome on an Android phone.
    #[must_use]
    pub fn android_chrome() -> Self {
        Self::new(
            ANDROID_CHROME_UA,
            FeatureSupport {
                fullscreen: true,
                wake_lock: true,
                vibration: true,
                orientation_lock: true,
            },
        )
    }

    /// Chrome on an Android tablet.
    #[must_use]
    pub fn android_tablet() -> Self {
        Self::new(
            ANDROID_TABLET_UA,
            FeatureSupport {
                fullscreen: true,
                wake_lock: true,
                vibration: true,
                orientation_lock: true,
            },
        )
    }

    /// Every call made so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[PlatformCall] {
        &self.calls
    }

    /// Whether a given call was made at least once.
    #[must_use]
    pub fn was_called(&self, call: &PlatformCall) -> bool {
        self.calls.contains(call)
    }

    /// Forget recorded calls (state is kept).
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Vibration patterns played so far.
    #[must_use]
    pub fn vibrations(&self) -> Vec<Vec<u32>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PlatformCall::Vibrate(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub const fn wake_lock_held(&self) -> bool {
        self.wake_lock.is_some()
    }

    #[must_use]
    pub const fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    #[must_use]
    pub const fn text_selection_locked(&self) -> bool {
        self.text_selection_locked
    }

    #[must_use]
    pub const fn locked_orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    /// Guards currently installed.
    #[must_use]
    pub fn installed_guards(&self) -> Vec<LockGuard> {
        self.guards.iter().copied().collect()
    }

    /// Whether the host state matches a freshly created host.
    #[must_use]
    pub fn is_at_baseline(&self) -> bool {
        self.wake_lock.is_none()
            && !self.scroll_locked
            && !self.text_selection_locked
            && self.orientation.is_none()
            && !self.fullscreen
            && self.guards.is_empty()
    }
}

impl Platform for SimulatedPlatform {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn features(&self) -> FeatureSupport {
        self.features
    }

    fn request_wake_lock(&mut self) -> Result<WakeLockHandle, PlatformError> {
        self.calls.push(PlatformCall::RequestWakeLock);
        if !self.features.wake_lock {
            return Err(PlatformError::Unsupported("wake lock"));
        }
        if self.deny_wake_lock {
            return Err(PlatformError::Denied {
                feature: "wake lock",
                reason: "battery saver is on".to_string(),
            });
        }
        let handle = WakeLockHandle(self.next_handle);
        self.next_handle += 1;
        self.wake_lock = Some(handle);
        Ok(handle)
    }

    fn release_wake_lock(&mut self, handle: WakeLockHandle) -> Result<(), PlatformError> {
        self.calls.push(PlatformCall::ReleaseWakeLock);
        if self.wake_lock == Some(handle) {
            self.wake_lock = None;
        }
        if self.fail_wake_lock_release {
            return Err(PlatformError::Failed {
                feature: "wake lock",
                reason: "sentinel already released".to_string(),
            });
        }
        Ok(())
    }

    fn vibrate(&mut self, pattern: &[u32]) -> Result<(), PlatformError> {
        if !self.features.vibration {
            return Err(PlatformError::Unsupported("vibration"));
        }
        self.calls.push(PlatformCall::Vibrate(pattern.to_vec()));
        Ok(())
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.calls.push(PlatformCall::SetScrollLocked(locked));
        self.scroll_locked = locked;
    }

    fn set_text_selection_locked(&mut self, locked: bool) {
        self.calls.push(PlatformCall::SetTextSelectionLocked(locked));
        self.text_selection_locked = locked;
    }

    fn lock_orientation(&mut self, orientation: Orientation) -> Result<(), PlatformError> {
        self.calls.push(PlatformCall::LockOrientation(orientation));
        if !self.features.orientation_lock {
            return Err(PlatformError::Unsupported("orientation lock"));
        }
        self.orientation = Some(orientation);
        Ok(())
    }

    fn unlock_orientation(&mut self) -> Result<(), PlatformError> {
        self.calls.push(PlatformCall::UnlockOrientation);
        if !self.features.orientation_lock {
            return Err(PlatformError::Unsupported("orientation lock"));
        }
        self.orientation = None;
        Ok(())
    }

    fn enter_fullscreen(&mut self) -> Result<(), PlatformError> {
        self.calls.push(PlatformCall::EnterFullscreen);
        if !self.features.fullscreen {
            return Err(PlatformError::Unsupported("fullscreen"));
        }
        if self.deny_fullscreen {
            return Err(PlatformError::Denied {
                feature: "fullscreen",
                reason: "request not triggered by user activation".to_string(),
            });
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), PlatformError> {
        self.calls.push(PlatformCall::ExitFullscreen);
        let was_fullscreen = self.fullscreen;
        self.fullscreen = false;
        if self.fail_fullscreen_exit && was_fullscreen {
            return Err(PlatformError::Failed {
                feature: "fullscreen",
                reason: "document not active".to_string(),
            });
        }
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn install_guard(&mut self, guard: LockGuard) {
        self.calls.push(PlatformCall::InstallGuard(guard));
        self.guards.insert(guard);
    }

    fn remove_guard(&mut self, guard: LockGuard) {
        self.calls.push(PlatformCall::RemoveGuard(guard));
        self.guards.remove(&guard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_platform_is_at_baseline() {
        assert!(SimulatedPlatform::desktop_chrome().is_at_baseline());
        assert!(SimulatedPlatform::ios_safari().is_at_baseline());
    }

    #[test]
    fn test_unsupported_wake_lock() {
        let mut platform = SimulatedPlatform::new("test", FeatureSupport::default());
        assert_eq!(
            platform.request_wake_lock(),
            Err(PlatformError::Unsupported("wake lock"))
        );
        assert!(!platform.wake_lock_held());
        assert!(platform.was_called(&PlatformCall::RequestWakeLock));
    }

    #[test]
    fn test_wake_lock_handles_are_distinct() {
        let mut platform = SimulatedPlatform::android_chrome();
        let first = platform.request_wake_lock().unwrap();
        platform.release_wake_lock(first).unwrap();
        let second = platform.request_wake_lock().unwrap();
        assert_ne!(first, second);
        assert!(platform.wake_lock_held());
    }

    #[test]
    fn test_failed_fullscreen_exit_still_leaves_fullscreen() {
        let mut platform = SimulatedPlatform::desktop_chrome();
        platform.fail_fullscreen_exit = true;
        platform.enter_fullscreen().unwrap();
        assert!(platform.exit_fullscreen().is_err());
        assert!(!platform.is_fullscreen());
    }

    #[test]
    fn test_guards_tracked() {
        let mut platform = SimulatedPlatform::desktop_chrome();
        platform.install_guard(LockGuard::ContextMenu);
        assert_eq!(platform.installed_guards(), vec![LockGuard::ContextMenu]);
        assert!(!platform.is_at_baseline());
        platform.remove_guard(LockGuard::ContextMenu);
        assert!(platform.is_at_baseline());
    }
}
