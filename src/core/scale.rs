//! Animation scale mapper.
//!
//! Turns a phase and its progress into a multiplier for the breathing
//! circle: it grows on the inhale, stays full on the hold, shrinks on the
//! exhale and rests at the base size otherwise.

use super::phase::BreathPhase;
use serde::{Deserialize, Serialize};

/// Scale bounds of the breathing animation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub base: f64,
    pub peak: f64,
}

impl ScaleRange {
    pub const fn new(base: f64, peak: f64) -> Self {
        Self { base, peak }
    }

    /// Linear interpolation from `base` (0) to `peak` (100).
    fn at(&self, percent: f64) -> f64 {
        self.base + (self.peak - self.base) * percent / 100.0
    }
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self::new(1.0, 1.3)
    }
}

/// Scale multiplier for `phase` at `progress_percent` (clamped to 0-100).
///
/// # Example
///
/// ```rust
/// use breathwork::core::{scale, BreathPhase, ScaleRange};
///
/// let range = ScaleRange::default();
/// assert_eq!(scale::breathing_scale(BreathPhase::Inhale, 0.0, range), 1.0);
/// assert_eq!(scale::breathing_scale(BreathPhase::InhaleHold, 10.0, range), 1.3);
/// ```
pub fn breathing_scale(phase: BreathPhase, progress_percent: f64, range: ScaleRange) -> f64 {
    let progress = if progress_percent.is_nan() {
        0.0
    } else {
        progress_percent.clamp(0.0, 100.0)
    };

    match phase {
        BreathPhase::Inhale => range.at(progress),
        BreathPhase::InhaleHold => range.peak,
        BreathPhase::Exhale => range.at(100.0 - progress),
        BreathPhase::ExhaleHold | BreathPhase::Ready | BreathPhase::Complete => range.base,
    }
}
