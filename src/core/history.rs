//! Phase transition history.
//!
//! Provides immutable tracking of the phases a session passed through,
//! with the wall-clock instant and session time of every change.

use super::phase::BreathPhase;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single phase change.
///
/// # Example
///
/// ```rust
/// use breathwork::core::{BreathPhase, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: BreathPhase::Inhale,
///     to: BreathPhase::Exhale,
///     timestamp: Utc::now(),
///     cycle: 1,
///     elapsed_seconds: 4.0,
/// };
/// assert_eq!(transition.to, BreathPhase::Exhale);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// Wall-clock instant the change was observed
    pub timestamp: DateTime<Utc>,
    /// Cycle the session was in after the change
    pub cycle: u32,
    /// Session time at which the change was observed
    pub elapsed_seconds: f64,
}

/// Ordered history of transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition appended.
///
/// # Example
///
/// ```rust
/// use breathwork::core::{BreathPhase, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new().record(StateTransition {
///     from: BreathPhase::Ready,
///     to: BreathPhase::Inhale,
///     timestamp: Utc::now(),
///     cycle: 1,
///     elapsed_seconds: 0.0,
/// });
///
/// assert_eq!(history.get_path(), vec![&BreathPhase::Ready, &BreathPhase::Inhale]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed: the first `from`, then every `to`.
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

    /// Wall-clock span between the first and last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Number of times `state` was entered.
    pub fn entries(&self, state: &S) -> usize {
        self.transitions.iter().filter(|t| &t.to == state).count()
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl StateHistory<BreathPhase> {
    /// Inhales started during the session.
    pub fn breaths_taken(&self) -> usize {
        self.entries(&BreathPhase::Inhale)
    }
}
