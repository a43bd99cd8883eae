//! Host events the lock controller reacts to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A key, independent of the host's input library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    F(u8),
    Escape,
    Enter,
    Other,
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Command on macOS, Windows key elsewhere.
    pub meta: bool,
}

impl KeyChord {
    /// A key with no modifiers.
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
        }
    }

    #[must_use]
    pub const fn ctrl(c: char) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(Key::Char(c))
        }
    }

    #[must_use]
    pub const fn meta(c: char) -> Self {
        Self {
            meta: true,
            ..Self::plain(Key::Char(c))
        }
    }

    #[must_use]
    pub const fn with_shift(self) -> Self {
        Self {
            shift: true,
            ..self
        }
    }

    #[must_use]
    pub const fn with_alt(self) -> Self {
        Self { alt: true, ..self }
    }

    /// Ctrl on most platforms, Cmd on macOS.
    const fn primary(&self) -> bool {
        self.ctrl || self.meta
    }

    fn char_is(&self, c: char) -> bool {
        matches!(self.key, Key::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

/// Escape-oriented shortcuts blocked while a lock session is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shortcut {
    /// Ctrl/Cmd+W
    CloseTab,
    /// Ctrl/Cmd+T
    NewTab,
    /// Ctrl/Cmd+N
    NewWindow,
    /// Ctrl/Cmd+Shift+N
    NewIncognitoWindow,
    /// Alt+F4, Cmd+Q
    CloseWindow,
    /// F11
    ToggleFullscreen,
}

impl Shortcut {
    /// Identify a blocked shortcut, if the chord is one.
    #[must_use]
    pub fn classify(chord: &KeyChord) -> Option<Self> {
        if chord.key == Key::F(11) {
            return Some(Self::ToggleFullscreen);
        }
        if chord.alt && chord.key == Key::F(4) {
            return Some(Self::CloseWindow);
        }
        if chord.meta && chord.char_is('q') {
            return Some(Self::CloseWindow);
        }
        if !chord.primary() {
            return None;
        }
        if chord.char_is('n') {
            return Some(if chord.shift {
                Self::NewIncognitoWindow
            } else {
                Self::NewWindow
            });
        }
        if chord.char_is('w') {
            return Some(Self::CloseTab);
        }
        if chord.char_is('t') {
            return Some(Self::NewTab);
        }
        None
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::CloseTab => "close tab",
            Self::NewTab => "new tab",
            Self::NewWindow => "new window",
            Self::NewIncognitoWindow => "new incognito window",
            Self::CloseWindow => "close window",
            Self::ToggleFullscreen => "toggle fullscreen",
        }
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Whether the page is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// An event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// The user is trying to leave or close the page.
    BeforeUnload,
    VisibilityChange(Visibility),
    ContextMenu,
    KeyDown(KeyChord),
}

/// What the host should do with an event after the controller saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Let the host handle the event normally.
    Pass,
    /// Suppress the host's default action.
    Prevent,
}

impl EventResponse {
    #[must_use]
    pub const fn is_prevented(self) -> bool {
        matches!(self, Self::Prevent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_primary_shortcuts() {
        assert_eq!(Shortcut::classify(&KeyChord::ctrl('w')), Some(Shortcut::CloseTab));
        assert_eq!(Shortcut::classify(&KeyChord::meta('W')), Some(Shortcut::CloseTab));
        assert_eq!(Shortcut::classify(&KeyChord::ctrl('t')), Some(Shortcut::NewTab));
        assert_eq!(Shortcut::classify(&KeyChord::ctrl('n')), Some(Shortcut::NewWindow));
        assert_eq!(
            Shortcut::classify(&KeyChord::ctrl('N').with_shift()),
            Some(Shortcut::NewIncognitoWindow)
        );
    }

    #[test]
    fn test_classify_close_window() {
        let alt_f4 = KeyChord::plain(Key::F(4)).with_alt();
        assert_eq!(Shortcut::classify(&alt_f4), Some(Shortcut::CloseWindow));
        assert_eq!(Shortcut::classify(&KeyChord::meta('q')), Some(Shortcut::CloseWindow));
        // Ctrl+Q is not the platform quit combo.
        assert_eq!(Shortcut::classify(&KeyChord::ctrl('q')), None);
    }

    #[test]
    fn test_classify_fullscreen_toggle() {
        assert_eq!(
            Shortcut::classify(&KeyChord::plain(Key::F(11))),
            Some(Shortcut::ToggleFullscreen)
        );
    }

    #[test]
    fn test_unmodified_keys_pass() {
        assert_eq!(Shortcut::classify(&KeyChord::plain(Key::Char('w'))), None);
        assert_eq!(Shortcut::classify(&KeyChord::plain(Key::F(4))), None);
        assert_eq!(Shortcut::classify(&KeyChord::ctrl('c')), None);
    }
}
