//! Breathing technique definitions.
//!
//! A technique is an immutable record of four phase durations plus display
//! metadata. It is validated once, when it is constructed or deserialized,
//! so every `TechniqueDefinition` value in the program has a positive cycle
//! length and at least one breathing phase.

use super::phase::BreathPhase;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Whole-second durations of the four phases of a cycle.
///
/// A duration of 0 means the phase is skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub inhale: u32,
    pub inhale_hold: u32,
    pub exhale: u32,
    pub exhale_hold: u32,
}

impl PhaseDurations {
    pub const fn new(inhale: u32, inhale_hold: u32, exhale: u32, exhale_hold: u32) -> Self {
        Self {
            inhale,
            inhale_hold,
            exhale,
            exhale_hold,
        }
    }

    /// Sum of the four durations.
    pub fn cycle_seconds(&self) -> u64 {
        u64::from(self.inhale)
            + u64::from(self.inhale_hold)
            + u64::from(self.exhale)
            + u64::from(self.exhale_hold)
    }

    /// Duration of one phase. Bookend phases have no duration.
    pub fn of(&self, phase: BreathPhase) -> u32 {
        match phase {
            BreathPhase::Inhale => self.inhale,
            BreathPhase::InhaleHold => self.inhale_hold,
            BreathPhase::Exhale => self.exhale,
            BreathPhase::ExhaleHold => self.exhale_hold,
            BreathPhase::Ready | BreathPhase::Complete => 0,
        }
    }

    /// Run every check, accumulating all violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<TechniqueViolation>> {
        let checks: Vec<Validation<(), NonEmptyVec<TechniqueViolation>>> = vec![
            if u64::from(self.inhale) + u64::from(self.exhale) == 0 {
                Validation::fail(TechniqueViolation::NoBreathingPhase)
            } else {
                Validation::success(())
            },
            if self.cycle_seconds() == 0 {
                Validation::fail(TechniqueViolation::EmptyCycle)
            } else {
                Validation::success(())
            },
        ];

        Validation::all_vec(checks).map(|_| ())
    }
}

/// A single rule a technique breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TechniqueViolation {
    #[error("inhale and exhale durations are both zero")]
    NoBreathingPhase,

    #[error("cycle duration is zero")]
    EmptyCycle,
}

/// A technique was rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid technique '{name}': {}", describe(.violations))]
pub struct TechniqueError {
    pub name: String,
    pub violations: Vec<TechniqueViolation>,
}

fn describe(violations: &[TechniqueViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Immutable description of one breathing pattern.
///
/// Share it between sessions behind an `Arc`; the engine never mutates it.
///
/// # Example
///
/// ```rust
/// use breathwork::core::{PhaseDurations, TechniqueDefinition};
///
/// let square = TechniqueDefinition::new("Square", PhaseDurations::new(4, 4, 4, 4))
///     .unwrap()
///     .with_color("#5b8def");
/// assert_eq!(square.cycle_duration_seconds(), 16);
///
/// assert!(TechniqueDefinition::new("Nothing", PhaseDurations::new(0, 3, 0, 3)).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TechniqueRecord")]
pub struct TechniqueDefinition {
    name: String,
    durations: PhaseDurations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// Unchecked wire shape of a technique.
#[derive(Deserialize)]
struct TechniqueRecord {
    name: String,
    durations: PhaseDurations,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<TechniqueRecord> for TechniqueDefinition {
    type Error = TechniqueError;

    fn try_from(record: TechniqueRecord) -> Result<Self, Self::Error> {
        let mut technique = TechniqueDefinition::new(record.name, record.durations)?;
        technique.color = record.color;
        technique.description = record.description;
        Ok(technique)
    }
}

impl TechniqueDefinition {
    /// Validate and create a technique.
    pub fn new(name: impl Into<String>, durations: PhaseDurations) -> Result<Self, TechniqueError> {
        let name = name.into();
        match durations.validate() {
            Validation::Success(_) => Ok(Self::trusted(name, durations)),
            Validation::Failure(violations) => Err(TechniqueError {
                name,
                violations: violations.iter().cloned().collect(),
            }),
        }
    }

    fn trusted(name: impl Into<String>, durations: PhaseDurations) -> Self {
        Self {
            name: name.into(),
            durations,
            color: None,
            description: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn durations(&self) -> PhaseDurations {
        self.durations
    }

    pub fn inhale_duration(&self) -> u32 {
        self.durations.inhale
    }

    pub fn inhale_hold_duration(&self) -> u32 {
        self.durations.inhale_hold
    }

    pub fn exhale_duration(&self) -> u32 {
        self.durations.exhale
    }

    pub fn exhale_hold_duration(&self) -> u32 {
        self.durations.exhale_hold
    }

    /// Length of one full cycle. Always positive.
    pub fn cycle_duration_seconds(&self) -> u64 {
        self.durations.cycle_seconds()
    }

    /// Duration of a single phase in seconds.
    pub fn phase_duration(&self, phase: BreathPhase) -> u32 {
        self.durations.of(phase)
    }

    /// Number of whole cycles that fit in `target_seconds`.
    pub fn cycles_within(&self, target_seconds: u32) -> u32 {
        let cycles = u64::from(target_seconds) / self.cycle_duration_seconds();
        u32::try_from(cycles).unwrap_or(u32::MAX)
    }

    /// Cycles per minute, for display.
    pub fn breaths_per_minute(&self) -> f64 {
        60.0 / self.cycle_duration_seconds() as f64
    }
}

/// Built-in techniques offered before the user defines their own.
pub mod presets {
    use super::{PhaseDurations, TechniqueDefinition};

    pub fn box_breathing() -> TechniqueDefinition {
        TechniqueDefinition::trusted("Box Breathing", PhaseDurations::new(4, 4, 4, 4))
            .with_color("#5b8def")
            .with_description("Equal inhale, hold, exhale and hold to steady focus.")
    }

    pub fn relaxing_478() -> TechniqueDefinition {
        TechniqueDefinition::trusted("4-7-8 Relaxing Breath", PhaseDurations::new(4, 7, 8, 0))
            .with_color("#9b7bd4")
            .with_description("Long hold and slow exhale to wind down before sleep.")
    }

    pub fn coherent() -> TechniqueDefinition {
        TechniqueDefinition::trusted("Coherent Breathing", PhaseDurations::new(5, 0, 5, 0))
            .with_color("#4fb7a5")
            .with_description("Six breaths a minute with no holds.")
    }

    pub fn deep_calm() -> TechniqueDefinition {
        TechniqueDefinition::trusted("Deep Calm", PhaseDurations::new(4, 0, 8, 0))
            .with_color("#e39b5b")
            .with_description("Exhale twice as long as the inhale.")
    }

    pub fn triangle() -> TechniqueDefinition {
        TechniqueDefinition::trusted("Triangle Breathing", PhaseDurations::new(4, 4, 4, 0))
            .with_color("#d46a8c")
            .with_description("Inhale, hold, exhale, then begin again.")
    }

    pub fn all() -> Vec<TechniqueDefinition> {
        vec![
            box_breathing(),
            relaxing_478(),
            coherent(),
            deep_calm(),
            triangle(),
        ]
    }
}
