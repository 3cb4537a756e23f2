//! Core State trait for values a breathing session moves through.
//!
//! Phase values implement this trait so that history and transition
//! records can describe them without knowing the concrete type.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for states a session can occupy.
///
/// All methods are pure. States are small immutable values that
/// describe where a session currently is.
///
/// # Example
///
/// ```rust
/// use breathwork::core::{BreathPhase, State};
///
/// assert_eq!(BreathPhase::InhaleHold.name(), "inhale_hold");
/// assert!(BreathPhase::Complete.is_final());
/// assert!(BreathPhase::Exhale.is_active());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Stable identifier used in logs and serialized records.
    fn name(&self) -> &str;

    /// Check if this is a terminal state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if a timer is expected to be running in this state.
    ///
    /// Default implementation returns `false`.
    fn is_active(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Lamp {
        Off,
        Glowing,
        Burnt,
    }

    impl State for Lamp {
        fn name(&self) -> &str {
            match self {
                Self::Off => "off",
                Self::Glowing => "glowing",
                Self::Burnt => "burnt",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Burnt)
        }

        fn is_active(&self) -> bool {
            matches!(self, Self::Glowing)
        }
    }

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Bare;

    impl State for Bare {
        fn name(&self) -> &str {
            "bare"
        }
    }

    #[test]
    fn defaults_are_neither_final_nor_active() {
        assert!(!Bare.is_final());
        assert!(!Bare.is_active());
    }

    #[test]
    fn overridden_predicates_are_used() {
        assert!(!Lamp::Off.is_active());
        assert!(Lamp::Glowing.is_active());
        assert!(Lamp::Burnt.is_final());
        assert_eq!(Lamp::Glowing.name(), "glowing");
    }

    #[test]
    fn state_serializes_correctly() {
        let json = serde_json::to_string(&Lamp::Glowing).unwrap();
        let back: Lamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Lamp::Glowing);
    }
}
