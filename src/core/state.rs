//! Core State trait for enumerated session states.
//!
//! States are plain values describing where something currently is. The
//! trait only exposes pure inspection methods so that states can be logged,
//! recorded in history and persisted without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for enumerated states tracked by this crate.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history records
/// - `PartialEq`: states are compared to detect real changes
/// - `Debug`: states show up in diagnostics
/// - `Serialize` + `Deserialize`: history can be persisted
///
/// # Example
///
/// ```rust
/// use sessiongate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum ExportState {
///     Idle,
///     Rendering,
///     Exported,
///     Failed,
/// }
///
/// impl State for ExportState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Rendering => "Rendering",
///             Self::Exported => "Exported",
///             Self::Failed => "Failed",
///         }
///     }
///
///     fn is_settled(&self) -> bool {
///         !matches!(self, Self::Rendering)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Failed)
///     }
/// }
///
/// assert!(ExportState::Idle.is_settled());
/// assert!(!ExportState::Rendering.is_settled());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Stable display name, used as a structured logging field.
    fn name(&self) -> &str;

    /// Whether the state is settled, i.e. not waiting on pending work.
    ///
    /// Default implementation returns `true`.
    fn is_settled(&self) -> bool {
        true
    }

    /// Whether this state represents a failure.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}
