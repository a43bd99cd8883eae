//! Terminal host for lock sessions.
//!
//! Maps lock features onto what a terminal can actually do:
//! - fullscreen is the alternate screen
//! - text-selection suppression is mouse capture
//! - vibration is the terminal bell
//! - visibility changes come from focus reporting
//!
//! Wake lock and orientation lock have no terminal equivalent.

use std::collections::BTreeSet;
use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::debug;

use super::{FeatureSupport, LockGuard, Orientation, Platform, PlatformError, WakeLockHandle};

/// Platform backed by a crossterm-controlled terminal.
pub struct TerminalPlatform<W: Write> {
    out: W,
    user_agent: String,
    fullscreen: bool,
    text_selection_locked: bool,
    mouse_captured: bool,
    guards: BTreeSet<LockGuard>,
}

impl TerminalPlatform<io::Stdout> {
    /// Terminal platform writing to stdout.
    #[must_use]
    pub fn stdout(user_agent: Option<String>) -> Self {
        Self::new(io::stdout(), user_agent)
    }
}

impl<W: Write> TerminalPlatform<W> {
    /// Create a terminal platform writing control sequences to `out`.
    ///
    /// When no user agent is given, one describing the host OS is used.
    pub fn new(out: W, user_agent: Option<String>) -> Self {
        Self {
            out,
            user_agent: user_agent.unwrap_or_else(default_user_agent),
            fullscreen: false,
            text_selection_locked: false,
            mouse_captured: false,
            guards: BTreeSet::new(),
        }
    }

    /// Whether the host is currently intercepting a class of events.
    #[must_use]
    pub fn intercepts(&self, guard: LockGuard) -> bool {
        self.guards.contains(&guard)
    }

    /// Underlying writer.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Keep mouse capture on while anything needs it.
    fn sync_mouse_capture(&mut self) {
        let wanted = self.text_selection_locked || self.guards.contains(&LockGuard::ContextMenu);
        if wanted == self.mouse_captured {
            return;
        }
        let result = if wanted {
            execute!(self.out, EnableMouseCapture)
        } else {
            execute!(self.out, DisableMouseCapture)
        };
        match result {
            Ok(()) => self.mouse_captured = wanted,
            Err(e) => debug!("mouse capture toggle failed: {e}"),
        }
    }
}

fn default_user_agent() -> String {
    let platform = match std::env::consts::OS {
        "macos" => "Macintosh; Intel Mac OS X 14_0",
        "windows" => "Windows NT 10.0; Win64; x64",
        _ => "X11; Linux x86_64",
    };
    format!("ultifocus/{} ({platform}) Terminal", env!("CARGO_PKG_VERSION"))
}

fn io_failure(feature: &'static str, e: &io::Error) -> PlatformError {
    PlatformError::Failed {
        feature,
        reason: e.to_string(),
    }
}

impl<W: Write> Platform for TerminalPlatform<W> {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn features(&self) -> FeatureSupport {
        FeatureSupport {
            fullscreen: true,
            wake_lock: false,
            vibration: true,
            orientation_lock: false,
        }
    }

    fn request_wake_lock(&mut self) -> Result<WakeLockHandle, PlatformError> {
        Err(PlatformError::Unsupported("wake lock"))
    }

    fn release_wake_lock(&mut self, _handle: WakeLockHandle) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("wake lock"))
    }

    fn vibrate(&mut self, _pattern: &[u32]) -> Result<(), PlatformError> {
        self.out
            .write_all(b"\x07")
            .and_then(|()| self.out.flush())
            .map_err(|e| io_failure("vibration", &e))
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        // The alternate screen has no scrollback to lock.
        debug!(locked, "scroll lock has no terminal equivalent");
    }

    fn set_text_selection_locked(&mut self, locked: bool) {
        self.text_selection_locked = locked;
        self.sync_mouse_capture();
    }

    fn lock_orientation(&mut self, _orientation: Orientation) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("orientation lock"))
    }

    fn unlock_orientation(&mut self) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("orientation lock"))
    }

    fn enter_fullscreen(&mut self) -> Result<(), PlatformError> {
        if self.fullscreen {
            return Ok(());
        }
        execute!(self.out, EnterAlternateScreen, Hide).map_err(|e| io_failure("fullscreen", &e))?;
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), PlatformError> {
        if !self.fullscreen {
            return Ok(());
        }
        self.fullscreen = false;
        execute!(self.out, LeaveAlternateScreen, Show).map_err(|e| io_failure("fullscreen", &e))
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn install_guard(&mut self, guard: LockGuard) {
        if !self.guards.insert(guard) {
            return;
        }
        if guard == LockGuard::VisibilityChange {
            if let Err(e) = execute!(self.out, EnableFocusChange) {
                debug!("focus reporting unavailable: {e}");
            }
        }
        self.sync_mouse_capture();
    }

    fn remove_guard(&mut self, guard: LockGuard) {
        if !self.guards.remove(&guard) {
            return;
        }
        if guard == LockGuard::VisibilityChange {
            if let Err(e) = execute!(self.out, DisableFocusChange) {
                debug!("failed to disable focus reporting: {e}");
            }
        }
        self.sync_mouse_capture();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform() -> TerminalPlatform<Vec<u8>> {
        TerminalPlatform::new(Vec::new(), None)
    }

    #[test]
    fn test_default_user_agent_is_desktop() {
        let ua = platform().user_agent();
        assert!(ua.starts_with("ultifocus/"));
        assert!(!ua.contains("Mobile"));
    }

    #[test]
    fn test_user_agent_override() {
        let p = TerminalPlatform::new(Vec::new(), Some("custom".to_string()));
        assert_eq!(p.user_agent(), "custom");
    }

    #[test]
    fn test_fullscreen_uses_alternate_screen() {
        let mut p = platform();
        p.enter_fullscreen().unwrap();
        assert!(p.is_fullscreen());
        assert!(!p.writer_mut().is_empty());

        p.exit_fullscreen().unwrap();
        assert!(!p.is_fullscreen());
    }

    #[test]
    fn test_vibrate_rings_bell() {
        let mut p = platform();
        p.vibrate(&[50]).unwrap();
        assert_eq!(p.writer_mut().as_slice(), b"\x07");
    }

    #[test]
    fn test_unsupported_features() {
        let mut p = platform();
        assert_eq!(
            p.request_wake_lock(),
            Err(PlatformError::Unsupported("wake lock"))
        );
        assert!(p.lock_orientation(Orientation::Portrait).is_err());
    }

    #[test]
    fn test_guard_install_and_remove() {
        let mut p = platform();
        p.install_guard(LockGuard::KeyboardShortcuts);
        assert!(p.intercepts(LockGuard::KeyboardShortcuts));
        p.remove_guard(LockGuard::KeyboardShortcuts);
        assert!(!p.intercepts(LockGuard::KeyboardShortcuts));
    }

    #[test]
    fn test_mouse_capture_follows_selection_and_context_menu() {
        let mut p = platform();
        p.set_text_selection_locked(true);
        p.install_guard(LockGuard::ContextMenu);
        assert!(p.mouse_captured);

        p.set_text_selection_locked(false);
        assert!(p.mouse_captured);

        p.remove_guard(LockGuard::ContextMenu);
        assert!(!p.mouse_captured);
    }
}
