//! Phase calculator: maps an offset within a cycle to a phase.
//!
//! Boundaries are accumulated in cycle order and the first range that
//! contains the offset wins. A zero-length phase has an empty range and
//! is never selected.

use super::phase::BreathPhase;
use super::technique::TechniqueDefinition;
use serde::{Deserialize, Serialize};

/// Position inside the current cycle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhasePosition {
    pub phase: BreathPhase,
    /// Seconds since the phase began.
    pub offset_seconds: f64,
    /// Full length of the phase in seconds.
    pub duration_seconds: f64,
    /// 0-100. A zero-length phase reports 100.
    pub progress_percent: f64,
}

impl PhasePosition {
    /// Whole seconds left in the phase, rounded up for countdown display.
    pub fn remaining_whole_seconds(&self) -> u32 {
        let left = (self.duration_seconds - self.offset_seconds).max(0.0).ceil();
        left as u32
    }
}

/// Locate `t` seconds into a cycle of `technique`.
///
/// `t` is expected in `0 <= t < cycle_duration`; negative offsets are
/// treated as 0 and larger offsets wrap into the cycle.
///
/// # Example
///
/// ```rust
/// use breathwork::core::{calculator, presets, BreathPhase};
///
/// let technique = presets::box_breathing();
/// let position = calculator::locate(&technique, 6.0);
/// assert_eq!(position.phase, BreathPhase::InhaleHold);
/// assert_eq!(position.progress_percent, 50.0);
/// ```
pub fn locate(technique: &TechniqueDefinition, t: f64) -> PhasePosition {
    let cycle = technique.cycle_duration_seconds() as f64;
    let t = if t.is_finite() { t.max(0.0) % cycle } else { 0.0 };

    let inhale = f64::from(technique.inhale_duration());
    let inhale_end = inhale + f64::from(technique.inhale_hold_duration());
    let exhale_end = inhale_end + f64::from(technique.exhale_duration());

    let (phase, start) = if t < inhale {
        (BreathPhase::Inhale, 0.0)
    } else if t < inhale_end {
        (BreathPhase::InhaleHold, inhale)
    } else if t < exhale_end {
        (BreathPhase::Exhale, inhale_end)
    } else {
        (BreathPhase::ExhaleHold, exhale_end)
    };

    let offset_seconds = t - start;
    let duration_seconds = f64::from(technique.phase_duration(phase));

    PhasePosition {
        phase,
        offset_seconds,
        duration_seconds,
        progress_percent: progress_percent(offset_seconds, duration_seconds),
    }
}

/// Fraction of a phase elapsed, as 0-100.
pub fn progress_percent(offset_seconds: f64, duration_seconds: f64) -> f64 {
    if duration_seconds > 0.0 {
        (offset_seconds / duration_seconds * 100.0).clamp(0.0, 100.0)
    } else {
        100.0
    }
}

/// First phase of a cycle, i.e. the phase at offset 0.
pub fn first_phase(technique: &TechniqueDefinition) -> BreathPhase {
    locate(technique, 0.0).phase
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::technique::PhaseDurations;

    fn technique(inhale: u32, inhale_hold: u32, exhale: u32, exhale_hold: u32) -> TechniqueDefinition {
        TechniqueDefinition::new(
            "test",
            PhaseDurations::new(inhale, inhale_hold, exhale, exhale_hold),
        )
        .unwrap()
    }

    #[test]
    fn phase_boundaries_follow_cycle_order() {
        let technique = technique(4, 2, 4, 2);
        let expected = [
            (0.0, BreathPhase::Inhale),
            (3.9, BreathPhase::Inhale),
            (4.0, BreathPhase::InhaleHold),
            (5.9, BreathPhase::InhaleHold),
            (6.0, BreathPhase::Exhale),
            (9.9, BreathPhase::Exhale),
            (10.0, BreathPhase::ExhaleHold),
            (11.9, BreathPhase::ExhaleHold),
        ];

        for (t, phase) in expected {
            assert_eq!(locate(&technique, t).phase, phase, "offset {t}");
        }
    }

    #[test]
    fn zero_length_hold_is_skipped() {
        let technique = technique(4, 0, 4, 0);
        let position = locate(&technique, 4.0);
        assert_eq!(position.phase, BreathPhase::Exhale);
        assert_eq!(position.offset_seconds, 0.0);
        assert_eq!(locate(&technique, 7.99).phase, BreathPhase::Exhale);
    }

    #[test]
    fn offset_is_measured_from_phase_start() {
        let technique = technique(4, 2, 4, 2);
        let position = locate(&technique, 7.0);
        assert_eq!(position.phase, BreathPhase::Exhale);
        assert!((position.offset_seconds - 1.0).abs() < 1e-9);
        assert!((position.progress_percent - 25.0).abs() < 1e-9);
        assert_eq!(position.duration_seconds, 4.0);
    }

    #[test]
    fn leading_zero_inhale_starts_in_hold() {
        let technique = technique(0, 2, 4, 0);
        assert_eq!(first_phase(&technique), BreathPhase::InhaleHold);
        assert_eq!(locate(&technique, 2.0).phase, BreathPhase::Exhale);
    }

    #[test]
    fn offsets_outside_cycle_are_normalised() {
        let technique = technique(4, 0, 4, 0);
        assert_eq!(locate(&technique, 8.0).phase, BreathPhase::Inhale);
        assert_eq!(locate(&technique, -3.0).phase, BreathPhase::Inhale);
        assert_eq!(locate(&technique, f64::NAN).phase, BreathPhase::Inhale);
    }

    #[test]
    fn zero_duration_progress_is_complete() {
        assert_eq!(progress_percent(0.0, 0.0), 100.0);
        assert_eq!(progress_percent(2.0, 4.0), 50.0);
    }

    #[test]
    fn remaining_whole_seconds_rounds_up() {
        let technique = technique(4, 2, 4, 2);
        assert_eq!(locate(&technique, 0.0).remaining_whole_seconds(), 4);
        assert_eq!(locate(&technique, 0.1).remaining_whole_seconds(), 4);
        assert_eq!(locate(&technique, 3.5).remaining_whole_seconds(), 1);
        assert_eq!(locate(&technique, 4.0).remaining_whole_seconds(), 2);
    }
}
