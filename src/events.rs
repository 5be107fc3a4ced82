//! Typed event bus
//!
//! Decouples UI triggers (radar selection, category filter) from the
//! components that react to them. One bus is created per application and
//! passed by reference; it is single-threaded and dispatches synchronously
//! in subscription order.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::domain::CategoryFilter;

/// Events published by the application
#[derive(Debug, Clone, PartialEq)]
pub enum RadarEvent {
    /// The selected radar changed; carries the radar id
    RadarChanged(String),
    /// The set of visible categories changed
    CategoryFilterChanged(CategoryFilter),
}

impl RadarEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            RadarEvent::RadarChanged(_) => EventKind::RadarChanged,
            RadarEvent::CategoryFilterChanged(_) => EventKind::CategoryFilterChanged,
        }
    }
}

/// Discriminant used to subscribe to one event type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RadarChanged,
    CategoryFilterChanged,
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Rc<RefCell<dyn FnMut(&RadarEvent)>>;

struct Listener {
    id: SubscriptionId,
    once: bool,
    callback: Callback,
}

/// Publish/subscribe hub for [`RadarEvent`]s
#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<HashMap<EventKind, Vec<Listener>>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for one event kind
    pub fn subscribe<F>(&self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&RadarEvent) + 'static,
    {
        self.register(kind, false, Rc::new(RefCell::new(callback)))
    }

    /// Registers a callback that is removed after its first call
    pub fn once<F>(&self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&RadarEvent) + 'static,
    {
        self.register(kind, true, Rc::new(RefCell::new(callback)))
    }

    fn register(&self, kind: EventKind, once: bool, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get() + 1);
        self.next_id.set(id.0);

        self.listeners
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(Listener { id, once, callback });

        id
    }

    /// Removes a subscription; returns false if it was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        for list in listeners.values_mut() {
            if let Some(pos) = list.iter().position(|l| l.id == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Delivers an event to every subscriber of its kind
    ///
    /// Callbacks may subscribe or unsubscribe while the event is being
    /// delivered; changes take effect from the next publish.
    pub fn publish(&self, event: &RadarEvent) {
        let kind = event.kind();

        let callbacks: Vec<Callback> = {
            let mut listeners = self.listeners.borrow_mut();
            let Some(list) = listeners.get_mut(&kind) else {
                return;
            };
            let callbacks = list.iter().map(|l| Rc::clone(&l.callback)).collect();
            list.retain(|l| !l.once);
            callbacks
        };

        for callback in callbacks {
            // A callback that publishes the same event re-entrantly is skipped
            if let Ok(mut handler) = callback.try_borrow_mut() {
                (*handler)(event);
            }
        }
    }

    /// Drops all listeners of one kind, or of every kind
    pub fn clear(&self, kind: Option<EventKind>) {
        let mut listeners = self.listeners.borrow_mut();
        match kind {
            Some(kind) => {
                listeners.remove(&kind);
            }
            None => listeners.clear(),
        }
    }

    /// Number of listeners registered for a kind
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .get(&kind)
            .map_or(0, Vec::len)
    }
}
