use super::state::{PlacementAction, PlacementError, PlacementState};
use crate::registry::EntryId;

/// Handle returned by [`PlacementStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PlacementState)>;

/// Single-writer store around [`PlacementState`]
///
/// Every change bumps [`revision`](Self::revision) and is pushed to the
/// subscribers in registration order. Listeners only get a shared view; state
/// changes go through [`dispatch`](Self::dispatch) and
/// [`take_confirmed`](Self::take_confirmed).
pub struct PlacementStore {
    state: PlacementState,
    revision: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl PlacementStore {
    pub fn new() -> Self {
        Self {
            state: PlacementState::new(),
            revision: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    /// Increases on every applied change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dispatch(&mut self, action: PlacementAction) -> Result<(), PlacementError> {
        self.state.apply(action)?;
        self.changed();
        Ok(())
    }

    /// Takes the pending confirmation, notifying only if there was one
    pub fn take_confirmed(&mut self) -> Option<EntryId> {
        let taken = self.state.take_confirmed();
        if taken.is_some() {
            self.changed();
        }
        taken
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&PlacementState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn changed(&mut self) {
        self.revision += 1;
        let state = self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&state);
        }
    }
}

impl Default for PlacementStore {
    fn default() -> Self {
        Self::new()
    }
}
