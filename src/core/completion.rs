//! Completion evaluator.
//!
//! Scores a session at the moment it ends, whether it ran to the target
//! or the user stopped it early.

use serde::{Deserialize, Serialize};

/// Percentage at or above which a session counts as completed.
pub const DEFAULT_COMPLETION_THRESHOLD: u8 = 95;

/// Outcome of one session. Produced once and never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub duration_seconds: f64,
    pub cycles_completed: u32,
    pub completed: bool,
    pub completed_percentage: u8,
}

/// Everything the evaluator needs, captured when the session ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompletionInput {
    pub elapsed_seconds: f64,
    pub target_seconds: u32,
    pub cycle_seconds: u64,
    pub total_cycles: u32,
    /// The session reached its target on its own.
    pub finished_naturally: bool,
}

/// Evaluates sessions against a completion threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionEvaluator {
    threshold_percent: u8,
}

impl Default for CompletionEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_COMPLETION_THRESHOLD)
    }
}

impl CompletionEvaluator {
    pub fn new(threshold_percent: u8) -> Self {
        Self { threshold_percent }
    }

    pub fn threshold_percent(&self) -> u8 {
        self.threshold_percent
    }

    /// Score a finished or stopped session.
    pub fn evaluate(&self, input: CompletionInput) -> SessionResult {
        let percentage = completed_percentage(input.elapsed_seconds, input.target_seconds);
        let cycles_completed = if input.finished_naturally {
            input.total_cycles
        } else {
            whole_cycles(input.elapsed_seconds, input.cycle_seconds).min(input.total_cycles)
        };

        SessionResult {
            duration_seconds: input.elapsed_seconds.max(0.0),
            cycles_completed,
            completed: percentage >= self.threshold_percent,
            completed_percentage: percentage,
        }
    }
}

/// `round(elapsed / target * 100)`, clamped to 0-100.
pub fn completed_percentage(elapsed_seconds: f64, target_seconds: u32) -> u8 {
    if target_seconds == 0 || !elapsed_seconds.is_finite() {
        return 0;
    }
    let percent = (elapsed_seconds * 100.0 / f64::from(target_seconds)).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Number of cycles fully traversed in `elapsed_seconds`.
pub fn whole_cycles(elapsed_seconds: f64, cycle_seconds: u64) -> u32 {
    if cycle_seconds == 0 || !elapsed_seconds.is_finite() || elapsed_seconds <= 0.0 {
        return 0;
    }
    let cycles = (elapsed_seconds / cycle_seconds as f64).floor();
    if cycles >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        cycles as u32
    }
}
