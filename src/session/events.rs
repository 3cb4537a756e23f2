//! Lifecycle events emitted by a session.

use crate::core::{BreathPhase, SessionResult};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;

/// A phase change observed by the session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseChange {
    pub from: BreathPhase,
    pub to: BreathPhase,
    pub cycle: u32,
    pub elapsed_seconds: f64,
}

/// What a single `tick` did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Not running, or paused. Nothing was read or changed.
    Idle,

    /// Display fields were refreshed within the same phase.
    Progressed,

    /// A new phase was entered.
    PhaseChanged(PhaseChange),

    /// The target duration was reached.
    Completed(SessionResult),
}

/// Owned copy of an event, for observers that forward events elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    PhaseChanged(PhaseChange),
    Completed(SessionResult),
}

/// Reacts to session lifecycle events.
///
/// Haptic, audio and voice devices hook in here. Both methods default to
/// doing nothing, so implementors override only what they need.
pub trait SessionObserver: Send {
    /// A breathing phase was entered. Fires once per transition.
    fn on_phase_change(&mut self, _change: &PhaseChange) {}

    /// The session ended, naturally or by `stop`. Fires once per session.
    fn on_complete(&mut self, _result: &SessionResult) {}
}

/// Forwards events over a channel. A dropped receiver is ignored.
impl SessionObserver for Sender<SessionEvent> {
    fn on_phase_change(&mut self, change: &PhaseChange) {
        let _ = self.send(SessionEvent::PhaseChanged(*change));
    }

    fn on_complete(&mut self, result: &SessionResult) {
        let _ = self.send(SessionEvent::Completed(*result));
    }
}
