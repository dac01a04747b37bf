use crate::ui::counter::state::Action;
use crate::ui::mvi::Intent;

/// Lifecycle of one remote counter operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterIntent {
    /// A remote call is about to be issued.
    Started(Action),
    /// The remote call returned the current counter value.
    Succeeded { action: Action, value: i64 },
    /// The remote call failed. The cause is logged, not stored.
    Failed { action: Action },
}

impl Intent for CounterIntent {}
