use std::sync::Arc;

use parking_lot::RwLock;

use crate::ui::counter::CounterState;

/// What changed, delivered after the change is visible through the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// Snapshot taken right after a reducer dispatch.
    Counter(CounterState),
    /// Particles were spawned or decayed.
    Particles { remaining: usize },
    Theme { index: usize, name: &'static str },
}

/// Receives change notifications. Called without any controller lock held.
pub trait StateObserver: Send + Sync {
    fn state_changed(&self, change: &StateChange);
}

impl<F> StateObserver for F
where
    F: Fn(&StateChange) + Send + Sync,
{
    fn state_changed(&self, change: &StateChange) {
        self(change)
    }
}

/// Cheaply clonable list of observers shared with background tasks.
#[derive(Clone, Default)]
pub struct ObserverSet {
    inner: Arc<RwLock<Vec<Arc<dyn StateObserver>>>>,
}

impl ObserverSet {
    pub fn subscribe(&self, observer: Arc<dyn StateObserver>) {
        self.inner.write().push(observer);
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn notify(&self, change: StateChange) {
        // Copy the list out so observers may subscribe from inside a callback.
        let observers: Vec<_> = self.inner.read().iter().cloned().collect();
        for observer in observers {
            observer.state_changed(&change);
        }
    }
}
