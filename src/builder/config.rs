//! Tunable session settings.

use crate::builder::error::BuildError;
use crate::core::completion::DEFAULT_COMPLETION_THRESHOLD;
use crate::core::ScaleRange;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings shared by every session an app creates.
///
/// Missing fields fall back to their defaults when deserialized.
///
/// # Example
///
/// ```rust
/// use breathwork::builder::SessionConfig;
///
/// let config = SessionConfig::from_json(r#"{ "peak_scale": 1.5 }"#).unwrap();
/// assert_eq!(config.peak_scale, 1.5);
/// assert_eq!(config.tick_interval_ms, 100);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Recommended polling period for the caller's scheduler.
    pub tick_interval_ms: u64,
    /// Circle scale at rest.
    pub base_scale: f64,
    /// Circle scale at full inhale.
    pub peak_scale: f64,
    /// Minimum percentage of the target for a session to count as completed.
    pub completion_threshold_percent: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let scale = ScaleRange::default();
        Self {
            tick_interval_ms: 100,
            base_scale: scale.base,
            peak_scale: scale.peak,
            completion_threshold_percent: DEFAULT_COMPLETION_THRESHOLD,
        }
    }
}

impl SessionConfig {
    /// Parse a JSON document. Fields are not validated until build.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        serde_json::from_str(json).map_err(|e| BuildError::InvalidConfig(e.to_string()))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn scale_range(&self) -> ScaleRange {
        ScaleRange::new(self.base_scale, self.peak_scale)
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.tick_interval_ms == 0 {
            return Err(BuildError::ZeroTickInterval);
        }

        let scale_ok = self.base_scale.is_finite()
            && self.peak_scale.is_finite()
            && self.base_scale > 0.0
            && self.base_scale <= self.peak_scale;
        if !scale_ok {
            return Err(BuildError::InvalidScaleRange {
                base: self.base_scale,
                peak: self.peak_scale,
            });
        }

        if !(1..=100).contains(&self.completion_threshold_percent) {
            return Err(BuildError::InvalidCompletionThreshold(
                self.completion_threshold_percent,
            ));
        }

        Ok(())
    }
}
