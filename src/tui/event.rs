//! Event handling for the TUI.
//!
//! Terminal events are translated into host events for the lock
//! controller:
//! - Ctrl+C is the unload attempt
//! - focus lost/gained is the visibility change
//! - a right click is the context menu
//! - Esc or `e` asks for an emergency exit

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::error::FocusError;
use crate::features::focus::{Key, KeyChord, PageEvent, Visibility};

/// Input after translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Something the lock controller reacts to.
    Page(PageEvent),
    /// Esc or `e`.
    EmergencyExit,
    /// `q`.
    Quit,
}

/// Wait up to `timeout` for the next meaningful input.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_input(timeout: Duration) -> Result<Option<Input>, FocusError> {
    if !event::poll(timeout).map_err(|e| FocusError::Terminal(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }
    let event =
        event::read().map_err(|e| FocusError::Terminal(format!("Event read failed: {e}")))?;
    Ok(translate(&event))
}

/// Map a terminal event to an input, or `None` if it is not one.
#[must_use]
pub fn translate(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(translate_key(key)),
        Event::FocusLost => Some(Input::Page(PageEvent::VisibilityChange(Visibility::Hidden))),
        Event::FocusGained => Some(Input::Page(PageEvent::VisibilityChange(
            Visibility::Visible,
        ))),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Right) => {
            Some(Input::Page(PageEvent::ContextMenu))
        }
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Input {
    let chord = chord(key);

    if chord.ctrl && chord.key == Key::Char('c') {
        return Input::Page(PageEvent::BeforeUnload);
    }

    let unmodified = !(chord.ctrl || chord.alt || chord.meta);
    match chord.key {
        Key::Escape => Input::EmergencyExit,
        Key::Char('e') if unmodified => Input::EmergencyExit,
        Key::Char('q') if unmodified => Input::Quit,
        _ => Input::Page(PageEvent::KeyDown(chord)),
    }
}

fn chord(key: &KeyEvent) -> KeyChord {
    let code = match key.code {
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        KeyCode::F(n) => Key::F(n),
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        _ => Key::Other,
    };
    let m = key.modifiers;

    KeyChord {
        key: code,
        ctrl: m.contains(KeyModifiers::CONTROL),
        shift: m.contains(KeyModifiers::SHIFT),
        alt: m.contains(KeyModifiers::ALT),
        meta: m.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::Shortcut;
    use crossterm::event::{MouseEvent, MouseEventKind};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_ctrl_c_is_unload() {
        assert_eq!(
            translate(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Input::Page(PageEvent::BeforeUnload))
        );
    }

    #[test]
    fn test_emergency_keys() {
        assert_eq!(
            translate(&key(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Input::EmergencyExit)
        );
        assert_eq!(
            translate(&key(KeyCode::Char('e'), KeyModifiers::NONE)),
            Some(Input::EmergencyExit)
        );
        assert!(matches!(
            translate(&key(KeyCode::Char('e'), KeyModifiers::CONTROL)),
            Some(Input::Page(PageEvent::KeyDown(_)))
        ));
    }

    #[test]
    fn test_quit_key() {
        assert_eq!(
            translate(&key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Input::Quit)
        );
    }

    #[test]
    fn test_shortcut_chords_survive_translation() {
        let Some(Input::Page(PageEvent::KeyDown(chord))) =
            translate(&key(KeyCode::Char('N'), KeyModifiers::CONTROL | KeyModifiers::SHIFT))
        else {
            panic!("expected a key event");
        };
        assert_eq!(Shortcut::classify(&chord), Some(Shortcut::NewIncognitoWindow));

        let Some(Input::Page(PageEvent::KeyDown(chord))) =
            translate(&key(KeyCode::F(4), KeyModifiers::ALT))
        else {
            panic!("expected a key event");
        };
        assert_eq!(Shortcut::classify(&chord), Some(Shortcut::CloseWindow));
    }

    #[test]
    fn test_focus_events() {
        assert_eq!(
            translate(&Event::FocusLost),
            Some(Input::Page(PageEvent::VisibilityChange(Visibility::Hidden)))
        );
        assert_eq!(
            translate(&Event::FocusGained),
            Some(Input::Page(PageEvent::VisibilityChange(Visibility::Visible)))
        );
    }

    #[test]
    fn test_right_click_is_context_menu() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(translate(&click), Some(Input::Page(PageEvent::ContextMenu)));
    }

    #[test]
    fn test_ignored_events() {
        assert_eq!(translate(&Event::Resize(80, 24)), None);
        let release = Event::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL)
        });
        assert_eq!(translate(&release), None);
    }
}
