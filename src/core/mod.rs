//! Pure core of the breathing engine.
//!
//! Everything here is deterministic and free of clocks and side effects:
//! - Technique definitions and their validation
//! - The phase calculator and animation scale mapper
//! - The completion evaluator
//! - Immutable phase history

pub mod calculator;
pub mod completion;
mod history;
mod phase;
pub mod scale;
mod state;
mod technique;

pub use calculator::PhasePosition;
pub use completion::{CompletionEvaluator, CompletionInput, SessionResult};
pub use history::{StateHistory, StateTransition};
pub use phase::BreathPhase;
pub use scale::ScaleRange;
pub use state::State;
pub use technique::{
    presets, PhaseDurations, TechniqueDefinition, TechniqueError, TechniqueViolation,
};
