//! Pure building blocks shared by the session and navigation layers.
//!
//! - `State` for enumerated states
//! - `Guard` predicates used by redirect rules
//! - Immutable transition history
//!
//! Nothing in this module performs I/O or holds mutable shared state.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
