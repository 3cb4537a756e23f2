//! Breathing phases.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a session currently is.
///
/// The four breathing phases repeat once per cycle; `Ready` and
/// `Complete` bookend a session and never carry a running timer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathPhase {
    Ready,
    Inhale,
    InhaleHold,
    Exhale,
    ExhaleHold,
    Complete,
}

impl BreathPhase {
    /// The four phases of a cycle, in traversal order.
    pub const CYCLE: [BreathPhase; 4] = [
        BreathPhase::Inhale,
        BreathPhase::InhaleHold,
        BreathPhase::Exhale,
        BreathPhase::ExhaleHold,
    ];

    /// Check if this is one of the four in-cycle phases.
    pub fn is_breathing(&self) -> bool {
        matches!(
            self,
            Self::Inhale | Self::InhaleHold | Self::Exhale | Self::ExhaleHold
        )
    }

    /// Short cue shown (or spoken) while the phase is running.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Ready => "Get ready",
            Self::Inhale => "Breathe in",
            Self::InhaleHold | Self::ExhaleHold => "Hold",
            Self::Exhale => "Breathe out",
            Self::Complete => "Well done",
        }
    }
}

impl State for BreathPhase {
    fn name(&self) -> &str {
        match self {
            Self::Ready => "ready",
            Self::Inhale => "inhale",
            Self::InhaleHold => "inhale_hold",
            Self::Exhale => "exhale",
            Self::ExhaleHold => "exhale_hold",
            Self::Complete => "complete",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Complete)
    }

    fn is_active(&self) -> bool {
        self.is_breathing()
    }
}

impl fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
