//! Explicit change notification.
//!
//! Observers are state owned by the controller, registered through
//! `subscribe` and invoked after every state transition. There is no
//! module-level registry and no global emitter.

use std::sync::Arc;

/// Callback contract for anything that renders controller state.
pub trait ChangeObserver: Send + Sync {
    /// Controller state changed: collection, filters, pagination, loading
    /// flag, or the error slot.
    fn inventory_changed(&self);
}

impl<F> ChangeObserver for F
where
    F: Fn() + Send + Sync,
{
    fn inventory_changed(&self) {
        self()
    }
}

/// Registry of subscribed observers.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Arc<dyn ChangeObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Arc<dyn ChangeObserver>) {
        self.observers.push(observer);
    }

    pub fn notify(&self) {
        for observer in &self.observers {
            observer.inventory_changed();
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
