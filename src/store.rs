//! Session state store with an ordered observer registry.
//!
//! The store exclusively owns the [`SessionState`]. Readers get clones, and
//! every mutation runs through [`Store::update`], which applies the change to
//! a working copy and swaps it in whole. Listeners run synchronously after
//! the swap, in registration order, once per call that changed something.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::state::{SessionState, StateField};
use crate::sync::Mutex;

/// Callback receiving `(new_state, previous_state, changed_fields)`.
pub type Listener = Arc<dyn Fn(&SessionState, &SessionState, &[StateField]) + Send + Sync>;

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

/// Owner of the session state.
pub struct Store {
    state: Mutex<SessionState>,
    listeners: Mutex<Registry>,
}

impl Store {
    /// Creates a store holding the given state.
    #[must_use]
    pub fn new(state: SessionState) -> Self {
        Self {
            state: Mutex::new(state),
            listeners: Mutex::new(Registry::default()),
        }
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.lock().clone()
    }

    /// Reads the current state without copying it.
    ///
    /// The closure must not call back into the store.
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.state.lock())
    }

    /// Applies a mutation and notifies listeners.
    ///
    /// The closure works on a copy; the stored state is replaced only after
    /// it returns, so observers never see a partial update. Listeners are not
    /// invoked when nothing changed.
    pub fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut guard = self.state.lock();
        let mut working = guard.clone();
        let result = f(&mut working);

        let changed = SessionState::changed_fields(&guard, &working);
        if changed.is_empty() {
            return result;
        }

        let previous = core::mem::replace(&mut *guard, working.clone());
        drop(guard);

        self.notify(&working, &previous, &changed);
        result
    }

    /// Replaces the whole state, notifying listeners.
    pub fn replace(&self, state: SessionState) {
        self.update(|current| *current = state);
    }

    /// Registers a listener. Listeners run in registration order.
    pub fn subscribe(
        &self,
        listener: impl Fn(&SessionState, &SessionState, &[StateField]) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.with(|registry| {
            let id = ListenerId(registry.next_id);
            registry.next_id += 1;
            registry.entries.push((id, Arc::new(listener)));
            id
        })
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.with(|registry| {
            let before = registry.entries.len();
            registry.entries.retain(|(entry, _)| *entry != id);
            registry.entries.len() != before
        })
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.with(|registry| registry.entries.len())
    }

    fn notify(&self, next: &SessionState, previous: &SessionState, changed: &[StateField]) {
        // Copy the list so listeners may subscribe or read the store.
        let listeners: Vec<Listener> = self.listeners.with(|registry| {
            registry
                .entries
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        });

        for listener in listeners {
            listener(next, previous, changed);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}
