//! # Signals
//!
//! Single-threaded publish/subscribe used by the scene model and the undo
//! manager to notify observers of value changes and history mutations.
//!
//! ## Overview
//!
//! - Handlers are invoked in the order they were subscribed
//! - Every subscription returns a [`SubscriptionId`] used to unsubscribe
//! - Emission works on a snapshot of the handler list, so a handler may
//!   subscribe or unsubscribe (itself or others) while being invoked
//!
//! ## Usage
//!
//! ```rust
//! use handlekit_core::signal::Signal;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let signal: Signal<u32> = Signal::new();
//! let seen = Rc::new(Cell::new(0));
//! let seen_clone = seen.clone();
//! let id = signal.subscribe(move |value| seen_clone.set(*value));
//!
//! signal.emit(&7);
//! assert_eq!(seen.get(), 7);
//!
//! assert!(signal.unsubscribe(id));
//! ```

use crate::types::Handler;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

/// Subscription handle for unsubscribing from a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// An ordered list of handlers notified with a payload of type `T`.
pub struct Signal<T> {
    handlers: RefCell<Vec<(SubscriptionId, Handler<T>)>>,
}

impl<T> Signal<T> {
    /// Create a signal with no subscribers
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler. Handlers run in subscription order.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        tracing::trace!("Subscription {} added", id);
        id
    }

    /// Unsubscribe a handler
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(sub, _)| *sub != id);
        let removed = handlers.len() != before;
        if removed {
            tracing::trace!("Subscription {} removed", id);
        }
        removed
    }

    /// Notify every subscriber, returning how many were called
    pub fn emit(&self, payload: &T) -> usize {
        let snapshot: Vec<Handler<T>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in &snapshot {
            handler(payload);
        }
        snapshot.len()
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Drop every subscription
    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
