//! Session reports handed to the caller's storage collaborator.
//!
//! The engine never writes anything itself. Once a session ends it can
//! produce a self-contained, versioned `SessionReport` that the caller
//! forwards wherever results are kept.

use crate::core::{BreathPhase, SessionResult, StateHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::ReportError;

/// Version identifier for the report format
pub const REPORT_VERSION: u32 = 1;

/// Serializable summary of one finished session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Report format version
    pub version: u32,

    /// Unique session identifier
    pub id: Uuid,

    /// Name of the technique that was practised
    pub technique: String,

    pub target_duration_seconds: u32,

    pub started_at: DateTime<Utc>,

    pub ended_at: DateTime<Utc>,

    /// How many times the user paused
    pub pause_count: u32,

    pub result: SessionResult,

    /// Every phase transition, in order
    pub history: StateHistory<BreathPhase>,
}

impl SessionReport {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        technique: impl Into<String>,
        target_duration_seconds: u32,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        pause_count: u32,
        result: SessionResult,
        history: StateHistory<BreathPhase>,
    ) -> Self {
        Self {
            version: REPORT_VERSION,
            id,
            technique: technique.into(),
            target_duration_seconds,
            started_at,
            ended_at,
            pause_count,
            result,
            history,
        }
    }

    /// Inhales started during the session.
    pub fn breaths_taken(&self) -> usize {
        self.history.breaths_taken()
    }

    /// Wall-clock span from start to end, pauses included.
    pub fn wall_clock_seconds(&self) -> f64 {
        let span = self.ended_at.signed_duration_since(self.started_at);
        span.to_std().map(|d| d.as_secs_f64()).unwrap_or(0.0)
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string(self).map_err(|e| ReportError::SerializationFailed(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReportError::SerializationFailed(e.to_string()))
    }

    /// Parse a report, rejecting versions this crate does not understand.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let report: SessionReport = serde_json::from_str(json)
            .map_err(|e| ReportError::DeserializationFailed(e.to_string()))?;

        if report.version != REPORT_VERSION {
            return Err(ReportError::UnsupportedVersion {
                found: report.version,
                supported: REPORT_VERSION,
            });
        }

        Ok(report)
    }
}
