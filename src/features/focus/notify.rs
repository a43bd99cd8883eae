//! Local notifications requested by the lock controller.
//!
//! Delivery belongs to the host; the controller only asks for display and
//! logs failures.

use std::cell::RefCell;
use std::rc::Rc;

#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::platform::PlatformError;

/// A title/body pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Notification delivery.
#[cfg_attr(test, automock)]
pub trait Notifier {
    /// Ask for permission to show notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the permission prompt itself failed.
    fn request_permission(&mut self) -> Result<bool, PlatformError>;

    /// Display a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be shown.
    fn notify(&mut self, notification: &Notification) -> Result<(), PlatformError>;
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn request_permission(&mut self) -> Result<bool, PlatformError> {
        Ok(true)
    }

    fn notify(&mut self, notification: &Notification) -> Result<(), PlatformError> {
        info!(title = %notification.title, "{}", notification.body);
        Ok(())
    }
}

/// Collects notifications for a UI to display later.
///
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct QueueNotifier {
    queue: Rc<RefCell<Vec<Notification>>>,
    muted: bool,
}

impl QueueNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose permission request is always refused.
    #[must_use]
    pub fn muted() -> Self {
        Self {
            muted: true,
            ..Self::default()
        }
    }

    /// Remove and return everything queued so far.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl Notifier for QueueNotifier {
    fn request_permission(&mut self) -> Result<bool, PlatformError> {
        Ok(!self.muted)
    }

    fn notify(&mut self, notification: &Notification) -> Result<(), PlatformError> {
        if self.muted {
            return Err(PlatformError::Denied {
                feature: "notifications",
                reason: "permission not granted".to_string(),
            });
        }
        self.queue.borrow_mut().push(notification.clone());
        Ok(())
    }
}
