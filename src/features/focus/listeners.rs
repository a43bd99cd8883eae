//! Active/idle change subscribers.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener = Box<dyn FnMut(bool)>;

/// Registered listeners, notified synchronously in registration order.
#[derive(Default)]
pub struct ListenerSet {
    inner: Rc<Registry>,
}

#[derive(Default)]
struct Registry {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Listener)>>,
    /// Ids removed while a notification was in flight.
    removed: RefCell<Vec<u64>>,
    notifying: Cell<bool>,
}

impl ListenerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays registered until the returned
    /// subscription is unsubscribed.
    pub fn subscribe(&self, listener: impl FnMut(bool) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.entries.borrow_mut().push((id, Box::new(listener)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every current listener with `active`.
    ///
    /// Listeners may subscribe or unsubscribe from inside the callback;
    /// such changes apply from the next notification on.
    pub fn notify(&self, active: bool) {
        let mut current = std::mem::take(&mut *self.inner.entries.borrow_mut());
        self.inner.notifying.set(true);
        for (_, listener) in &mut current {
            listener(active);
        }
        self.inner.notifying.set(false);

        let mut entries = self.inner.entries.borrow_mut();
        let added = std::mem::take(&mut *entries);
        *entries = current;
        entries.extend(added);

        let removed = std::mem::take(&mut *self.inner.removed.borrow_mut());
        entries.retain(|(id, _)| !removed.contains(id));
    }
}

impl Registry {
    fn remove(&self, id: u64) {
        self.entries.borrow_mut().retain(|(entry, _)| *entry != id);
        if self.notifying.get() {
            self.removed.borrow_mut().push(id);
        }
    }
}

/// Handle returned by [`ListenerSet::subscribe`].
///
/// Dropping the handle keeps the listener registered.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<Registry>,
}

impl Subscription {
    /// Remove the listener. Safe to call after the set is gone.
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}
