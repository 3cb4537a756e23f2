//! Builder for constructing breathing sessions.

use crate::builder::config::SessionConfig;
use crate::builder::error::BuildError;
use crate::clock::{TimeSource, WallClock};
use crate::core::{PhaseDurations, TechniqueDefinition};
use crate::session::{BreathingSession, SessionObserver};
use std::sync::Arc;

/// Builder for constructing sessions with a fluent API.
pub struct SessionBuilder<T: TimeSource = WallClock> {
    technique: Option<Arc<TechniqueDefinition>>,
    target_duration: Option<u32>,
    config: SessionConfig,
    time_source: T,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl SessionBuilder<WallClock> {
    /// Create a new builder on the system clock.
    pub fn new() -> Self {
        Self {
            technique: None,
            target_duration: None,
            config: SessionConfig::default(),
            time_source: WallClock,
            observers: Vec::new(),
        }
    }
}

impl Default for SessionBuilder<WallClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> SessionBuilder<T> {
    /// Set the technique (required). Accepts an owned or shared definition.
    pub fn technique(mut self, technique: impl Into<Arc<TechniqueDefinition>>) -> Self {
        self.technique = Some(technique.into());
        self
    }

    /// Validate raw durations and use them as the technique.
    pub fn try_technique(
        self,
        name: impl Into<String>,
        durations: PhaseDurations,
    ) -> Result<Self, BuildError> {
        let technique = TechniqueDefinition::new(name, durations)?;
        Ok(self.technique(technique))
    }

    /// Set the target duration in seconds (required).
    pub fn target_duration(mut self, seconds: u32) -> Self {
        self.target_duration = Some(seconds);
        self
    }

    /// Set the target duration in whole minutes.
    pub fn target_minutes(self, minutes: u32) -> Self {
        self.target_duration(minutes.saturating_mul(60))
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Register an observer for phase-change and completion events.
    pub fn observer(mut self, observer: impl SessionObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Swap the clock the session reads time from.
    pub fn time_source<U: TimeSource>(self, time_source: U) -> SessionBuilder<U> {
        SessionBuilder {
            technique: self.technique,
            target_duration: self.target_duration,
            config: self.config,
            time_source,
            observers: self.observers,
        }
    }

    /// Build the session in the `ready` state.
    /// Returns an error if required fields are missing or invalid.
    pub fn build(self) -> Result<BreathingSession<T>, BuildError> {
        let technique = self.technique.ok_or(BuildError::MissingTechnique)?;
        let target = self.target_duration.ok_or(BuildError::MissingTargetDuration)?;
        if target == 0 {
            return Err(BuildError::ZeroTargetDuration);
        }
        self.config.validate()?;

        Ok(BreathingSession::from_parts(
            technique,
            target,
            &self.config,
            self.time_source,
            self.observers,
        ))
    }
}
