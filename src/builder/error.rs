//! Build errors for sessions and their configuration.

use crate::core::TechniqueError;
use thiserror::Error;

/// Errors that can occur when building a breathing session.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Technique not specified. Call .technique(definition) before .build()")]
    MissingTechnique,

    #[error("Target duration not specified. Call .target_duration(seconds) before .build()")]
    MissingTargetDuration,

    #[error("Target duration must be at least one second")]
    ZeroTargetDuration,

    #[error(transparent)]
    InvalidTechnique(#[from] TechniqueError),

    #[error("Invalid scale range: base {base} must be positive and no larger than peak {peak}")]
    InvalidScaleRange { base: f64, peak: f64 },

    #[error("Completion threshold {0}% is outside 1..=100")]
    InvalidCompletionThreshold(u8),

    #[error("Tick interval must be at least one millisecond")]
    ZeroTickInterval,

    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),
}
