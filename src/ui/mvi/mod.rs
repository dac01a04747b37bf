//! Model-View-Intent primitives.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Observers / View
//!    ↑                                   │
//!    └───────────────────────────────────┘
//! ```
//!
//! Reducers are the only place a state value changes. Side effects (remote
//! calls, particle bursts, notifications) stay in the controller that
//! dispatches intents.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
