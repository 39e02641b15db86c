//! Immutable history of state transitions.
//!
//! Each transition records where a state moved from and to, when, and the
//! event that caused the move. Recording returns a new history and leaves
//! the old one untouched.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state change caused by an event `E`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "E: Serialize", deserialize = "E: DeserializeOwned"))]
pub struct StateTransition<S: State, E> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
    /// What caused the change
    pub event: E,
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use sessiongate::core::{StateHistory, StateTransition};
/// use sessiongate::session::{SessionEvent, SessionPhase};
/// use chrono::Utc;
///
/// let history = StateHistory::new().record(StateTransition {
///     from: SessionPhase::Loading,
///     to: SessionPhase::SignedOut,
///     timestamp: Utc::now(),
///     event: SessionEvent::StartedSignedOut,
/// });
///
/// let history = history.record(StateTransition {
///     from: SessionPhase::SignedOut,
///     to: SessionPhase::SignedIn,
///     timestamp: Utc::now(),
///     event: SessionEvent::SignedIn,
/// });
///
/// assert_eq!(
///     history.get_path(),
///     vec![&SessionPhase::Loading, &SessionPhase::SignedOut, &SessionPhase::SignedIn]
/// );
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "E: Serialize", deserialize = "E: DeserializeOwned"))]
pub struct StateHistory<S: State, E> {
    transitions: Vec<StateTransition<S, E>>,
}

impl<S: State, E: Clone> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Clone> StateHistory<S, E> {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S, E>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed in order: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Append in place, dropping the oldest transitions beyond `limit`.
    pub fn push_bounded(&mut self, transition: StateTransition<S, E>, limit: usize) {
        self.transitions.push(transition);
        if self.transitions.len() > limit {
            let excess = self.transitions.len() - limit;
            self.transitions.drain(..excess);
        }
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S, E>> {
        self.transitions.last()
    }

    /// All transitions in order.
    pub fn transitions(&self) -> &[StateTransition<S, E>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Door {
        Closed,
        Open,
        Locked,
    }

    impl State for Door {
        fn name(&self) -> &str {
            match self {
                Self::Closed => "Closed",
                Self::Open => "Open",
                Self::Locked => "Locked",
            }
        }
    }

    fn step(from: Door, to: Door, event: &str) -> StateTransition<Door, String> {
        StateTransition {
            from,
            to,
            timestamp: Utc::now(),
            event: event.to_string(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<Door, String> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let next = history.record(step(Door::Closed, Door::Open, "push"));

        assert_eq!(history.len(), 0);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn path_follows_transitions() {
        let history = StateHistory::new()
            .record(step(Door::Closed, Door::Open, "push"))
            .record(step(Door::Open, Door::Closed, "pull"))
            .record(step(Door::Closed, Door::Locked, "turn key"));

        assert_eq!(
            history.get_path(),
            vec![&Door::Closed, &Door::Open, &Door::Closed, &Door::Locked]
        );
        assert_eq!(history.last().map(|t| t.event.as_str()), Some("turn key"));
    }

    #[test]
    fn push_bounded_keeps_newest() {
        let mut history = StateHistory::new();
        history.push_bounded(step(Door::Closed, Door::Open, "push"), 2);
        history.push_bounded(step(Door::Open, Door::Closed, "pull"), 2);
        history.push_bounded(step(Door::Closed, Door::Locked, "turn key"), 2);

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![&Door::Open, &Door::Closed, &Door::Locked]
        );
    }

    #[test]
    fn single_transition_has_zero_duration() {
        let history = StateHistory::new().record(step(Door::Closed, Door::Open, "push"));
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let mut first = step(Door::Closed, Door::Open, "push");
        first.timestamp = start;
        let mut second = step(Door::Open, Door::Closed, "pull");
        second.timestamp = start + chrono::Duration::seconds(3);

        let history = StateHistory::new().record(first).record(second);
        assert_eq!(history.duration(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn history_serializes() {
        let history = StateHistory::new().record(step(Door::Closed, Door::Open, "push"));

        let json = serde_json::to_string(&history).unwrap();
        let back: StateHistory<Door, String> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.len(), 1);
        assert_eq!(back.transitions()[0].to, Door::Open);
        assert_eq!(back.transitions()[0].event, "push");
    }
}
