//! Breathwork: a guided-breathing session engine
//!
//! Breathwork drives a user through a timed breathing technique such as
//! 4-4-4-4 box breathing. It follows a "pure core, imperative shell"
//! layout: phase lookup, animation scaling and completion scoring are pure
//! functions, while a single explicitly owned session wraps them with a
//! wall-clock anchored clock and lifecycle events.
//!
//! # Core Concepts
//!
//! - **Technique**: immutable, validated phase durations (`core`)
//! - **Session clock**: elapsed time anchored to wall-clock time, so
//!   throttled ticks and pauses never distort it (`clock`)
//! - **Session**: the state machine the caller ticks on an interval (`session`)
//! - **Report**: a versioned value object for the caller to store (`report`)
//!
//! # Example
//!
//! ```rust
//! use breathwork::clock::ManualClock;
//! use breathwork::core::{presets, BreathPhase};
//! use breathwork::session::{BreathingSession, TickOutcome};
//! use std::time::Duration;
//!
//! let time = ManualClock::default();
//! let mut session = BreathingSession::builder()
//!     .technique(presets::box_breathing())
//!     .target_duration(32)
//!     .time_source(time.clone())
//!     .build()
//!     .unwrap();
//!
//! session.start();
//! time.advance(Duration::from_secs(4));
//! assert!(matches!(session.tick(), TickOutcome::PhaseChanged(_)));
//! assert_eq!(session.state().phase, BreathPhase::InhaleHold);
//!
//! time.advance(Duration::from_secs(28));
//! let TickOutcome::Completed(result) = session.tick() else {
//!     panic!("session should be complete");
//! };
//! assert!(result.completed);
//! assert_eq!(result.cycles_completed, 2);
//! ```

pub mod builder;
pub mod clock;
pub mod core;
pub mod report;
pub mod session;

// Re-export commonly used types
pub use builder::{BuildError, SessionBuilder, SessionConfig};
pub use clock::{ManualClock, SessionClock, TimeSource, WallClock};
pub use self::core::{
    BreathPhase, PhaseDurations, ScaleRange, SessionResult, State, TechniqueDefinition,
    TechniqueError,
};
pub use report::{ReportError, SessionReport};
pub use session::{BreathingSession, SessionEvent, SessionObserver, SessionState, TickOutcome};
