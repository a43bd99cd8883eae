//! User-facing dialogs used by the lock controller.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[cfg(test)]
use mockall::automock;

/// First emergency-exit confirmation.
pub const EMERGENCY_CONFIRM: &str = "Are you sure you want to exit lock mode?\n\n\
     Ending the session now forfeits all progress and rewards for this session. \
     This cannot be undone.";

/// Second, distinct emergency-exit confirmation.
pub const EMERGENCY_FINAL_WARNING: &str = "FINAL WARNING\n\n\
     Your focus progress will be lost and no XP or coins will be awarded. \
     Exit anyway?";

/// Reminder shown after the user leaves the page on desktop.
pub const STAY_FOCUSED_ALERT: &str = "Stay focused! You are in UltiFocus lock mode. \
     Leaving counts as an exit attempt.";

/// Blocking yes/no confirmations and alerts.
#[cfg_attr(test, automock)]
pub trait Prompter {
    /// Ask the user to accept or decline.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show an informational message.
    fn alert(&mut self, message: &str);
}

/// Prompter that replays canned answers and records what it was asked.
///
/// Declines once the script is exhausted. Clones share the same script and
/// record, so a caller can keep a handle after giving one to the controller.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    inner: Rc<RefCell<Script>>,
}

#[derive(Debug, Default)]
struct Script {
    answers: VecDeque<bool>,
    confirmations: Vec<String>,
    alerts: Vec<String>,
}

impl ScriptedPrompter {
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Script {
                answers: answers.into_iter().collect(),
                ..Script::default()
            })),
        }
    }

    /// Confirmation messages shown so far.
    #[must_use]
    pub fn confirmations(&self) -> Vec<String> {
        self.inner.borrow().confirmations.clone()
    }

    /// Alert messages shown so far.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.inner.borrow().alerts.clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        let mut script = self.inner.borrow_mut();
        script.confirmations.push(message.to_string());
        script.answers.pop_front().unwrap_or(false)
    }

    fn alert(&mut self, message: &str) {
        self.inner.borrow_mut().alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_then_decline() {
        let mut prompter = ScriptedPrompter::new([true]);
        let handle = prompter.clone();
        assert!(prompter.confirm("one"));
        assert!(!prompter.confirm("two"));
        assert_eq!(handle.confirmations(), vec!["one", "two"]);
    }

    #[test]
    fn test_records_alerts() {
        let mut prompter = ScriptedPrompter::default();
        prompter.alert("hi");
        assert_eq!(prompter.alerts(), vec!["hi"]);
    }

    #[test]
    fn test_confirmations_are_distinct() {
        assert_ne!(EMERGENCY_CONFIRM, EMERGENCY_FINAL_WARNING);
    }
}
