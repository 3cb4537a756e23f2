//! Readable snapshot of a running session.

use crate::core::BreathPhase;
use serde::{Deserialize, Serialize};

/// Display state of one session.
///
/// Only the owning `BreathingSession` writes it; everyone else reads a
/// borrowed or cloned snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: BreathPhase,
    /// Cycle in progress, never above `total_cycles`.
    pub current_cycle: u32,
    /// Whole cycles that fit in the target, fixed when the session is built.
    pub total_cycles: u32,
    pub target_duration_seconds: u32,
    pub elapsed_time_seconds: f64,
    pub remaining_time_seconds: f64,
    pub phase_progress_percent: f64,
    /// Whole seconds left in the current phase.
    pub phase_remaining_seconds: u32,
    pub is_active: bool,
    pub is_paused: bool,
}

impl SessionState {
    pub(crate) fn ready(target_duration_seconds: u32, total_cycles: u32) -> Self {
        Self {
            phase: BreathPhase::Ready,
            current_cycle: 0,
            total_cycles,
            target_duration_seconds,
            elapsed_time_seconds: 0.0,
            remaining_time_seconds: f64::from(target_duration_seconds),
            phase_progress_percent: 0.0,
            phase_remaining_seconds: 0,
            is_active: false,
            is_paused: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase == BreathPhase::Ready && !self.is_active
    }

    pub fn is_complete(&self) -> bool {
        self.phase == BreathPhase::Complete
    }

    /// Running and not paused.
    pub fn is_running(&self) -> bool {
        self.is_active && !self.is_paused
    }
}
