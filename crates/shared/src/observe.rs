//! Observer protocol for store change notification.
//!
//! Every store holds an [`ObserverSet`] and calls [`ObserverSet::notify`]
//! after each committed mutation. Notifications carry no payload; listeners
//! re-read through the store's accessors, which always return a fresh
//! snapshot.
//!
//! Contract:
//! - Listeners run synchronously, in registration order.
//! - The listener set is snapshotted before iteration: a listener registered
//!   during a notification is not invoked for the in-flight notification.
//! - Unsubscribing during a notification never panics and never skips
//!   unrelated listeners (the already-taken snapshot still runs to the end).

use std::sync::{Arc, Mutex};

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`ObserverSet::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// An ordered set of change listeners.
///
/// The lock is held only while the set itself is read or written, never
/// while listeners run, so listeners are free to subscribe, unsubscribe,
/// or re-read the owning store.
pub struct ObserverSet {
    registry: Mutex<Registry>,
}

impl ObserverSet {
    /// Creates an empty observer set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            }),
        }
    }

    /// Registers a listener, returning the id used to unsubscribe it.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> SubscriberId {
        let mut registry = self.registry.lock().expect("observer registry poisoned");
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));
        SubscriberId(id)
    }

    /// Removes a listener. Returns false if the id was already gone.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut registry = self.registry.lock().expect("observer registry poisoned");
        let before = registry.listeners.len();
        registry.listeners.retain(|(lid, _)| *lid != id.0);
        registry.listeners.len() != before
    }

    /// Invokes every registered listener, in registration order.
    pub fn notify(&self) {
        let snapshot: Vec<Listener> = {
            let registry = self.registry.lock().expect("observer registry poisoned");
            registry
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };
        tracing::trace!(listeners = snapshot.len(), "notifying observers");
        for listener in snapshot {
            listener();
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry
            .lock()
            .expect("observer registry poisoned")
            .listeners
            .len()
    }

    /// Returns true if no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ObserverSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSet")
            .field("listeners", &self.len())
            .finish()
    }
}
