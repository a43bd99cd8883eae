//! Blocking dialogs drawn straight onto the terminal.
//!
//! The dialog overwrites whatever ratatui drew; the caller repaints
//! afterwards. Focus changes seen while a dialog is open are kept for the
//! caller to replay.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEventKind},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType},
};
use tracing::warn;

use crate::features::focus::Prompter;

const MAX_WIDTH: usize = 64;

/// Prompter that takes over the terminal until answered.
///
/// Clones share the deferred focus events.
#[derive(Debug, Default, Clone)]
pub struct TerminalPrompter {
    deferred: Rc<RefCell<Vec<Event>>>,
}

impl TerminalPrompter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus events that arrived while a dialog was open, oldest first.
    #[must_use]
    pub fn take_deferred(&self) -> Vec<Event> {
        std::mem::take(&mut *self.deferred.borrow_mut())
    }

    fn read_key(&self) -> io::Result<KeyCode> {
        loop {
            if let Some(code) = self.accept(event::read()?) {
                return Ok(code);
            }
        }
    }

    /// Key code that answers the dialog, deferring focus changes.
    pub(crate) fn accept(&self, event: Event) -> Option<KeyCode> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(key.code),
            Event::FocusLost | Event::FocusGained => {
                self.deferred.borrow_mut().push(event);
                None
            }
            _ => None,
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        if let Err(e) = draw_dialog(message, "[y] Yes    [n] No") {
            warn!("failed to draw confirmation: {e}");
            return false;
        }
        loop {
            match self.read_key() {
                Ok(KeyCode::Char('y' | 'Y')) => return true,
                Ok(KeyCode::Char('n' | 'N') | KeyCode::Esc | KeyCode::Enter) => return false,
                Ok(_) => {}
                Err(e) => {
                    warn!("failed to read confirmation: {e}");
                    return false;
                }
            }
        }
    }

    fn alert(&mut self, message: &str) {
        if let Err(e) = draw_dialog(message, "Press any key") {
            warn!("failed to draw alert: {e}");
            return;
        }
        if let Err(e) = self.read_key() {
            warn!("failed to read alert acknowledgement: {e}");
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_dialog(message: &str, footer: &str) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let width = (cols as usize).saturating_sub(4).clamp(20, MAX_WIDTH);

    let mut lines = wrap(message, width);
    lines.push(String::new());
    lines.push(footer.to_string());

    let mut out = io::stdout();
    queue!(out, Clear(ClearType::All))?;
    let top = rows.saturating_sub(lines.len() as u16) / 2;
    for (i, line) in lines.iter().enumerate() {
        let x = cols.saturating_sub(line.chars().count() as u16) / 2;
        queue!(out, MoveTo(x, top.saturating_add(i as u16)))?;
        if i == 0 {
            queue!(out, SetAttribute(Attribute::Bold), Print(line), SetAttribute(Attribute::Reset))?;
        } else {
            queue!(out, Print(line))?;
        }
    }
    out.flush()
}

/// Greedy word wrap that keeps blank lines.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    #[test]
    fn test_focus_changes_are_deferred() {
        let prompter = TerminalPrompter::new();
        let shared = prompter.clone();

        assert_eq!(prompter.accept(Event::FocusLost), None);
        assert_eq!(prompter.accept(Event::FocusGained), None);
        assert_eq!(
            prompter.accept(Event::Key(KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE))),
            Some(KeyCode::Char('y'))
        );

        assert_eq!(shared.take_deferred(), vec![Event::FocusLost, Event::FocusGained]);
        assert!(prompter.take_deferred().is_empty());
    }

    #[test]
    fn test_key_release_does_not_answer() {
        let prompter = TerminalPrompter::new();
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('y'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(prompter.accept(Event::Key(release)), None);
        assert_eq!(prompter.accept(Event::Resize(80, 24)), None);
        assert!(prompter.take_deferred().is_empty());
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("one two three four five six", 9);
        assert_eq!(lines, vec!["one two", "three", "four five", "six"]);
    }

    #[test]
    fn test_wrap_keeps_blank_lines() {
        let lines = wrap("FINAL WARNING\n\nExit anyway?", 40);
        assert_eq!(lines, vec!["FINAL WARNING", "", "Exit anyway?"]);
    }

    #[test]
    fn test_wrap_long_word() {
        let lines = wrap("supercalifragilistic", 5);
        assert_eq!(lines, vec!["supercalifragilistic"]);
    }
}
