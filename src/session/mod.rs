//! Session state machine.
//!
//! This is the imperative shell around the pure core: it owns the session
//! clock and the mutable `SessionState`, and it fires lifecycle events to
//! observers at well-defined points.

mod events;
mod machine;
mod state;

pub use events::{PhaseChange, SessionEvent, SessionObserver, TickOutcome};
pub use machine::BreathingSession;
pub use state::SessionState;
