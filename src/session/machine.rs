//! The guided-breathing state machine.

use crate::builder::{BuildError, SessionBuilder, SessionConfig};
use crate::clock::{SessionClock, TimeSource, WallClock};
use crate::core::completion::whole_cycles;
use crate::core::{
    calculator, scale, BreathPhase, CompletionEvaluator, CompletionInput, ScaleRange,
    SessionResult, StateHistory, StateTransition, TechniqueDefinition,
};
use crate::report::SessionReport;
use crate::session::events::{PhaseChange, SessionObserver, TickOutcome};
use crate::session::state::SessionState;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace};
use uuid::Uuid;

/// Drives one breathing session from `ready` to `complete`.
///
/// The session never schedules itself: the caller invokes [`tick`] on a
/// fixed interval (see [`tick_interval`]) and every tick re-reads the
/// wall-clock anchored [`SessionClock`], so late or skipped ticks do not
/// distort elapsed time.
///
/// Lifecycle calls made in the wrong state are no-ops: `start`, `pause`
/// and `resume` return `false`, `stop` returns `None`, `tick` returns
/// [`TickOutcome::Idle`].
///
/// [`tick`]: BreathingSession::tick
/// [`tick_interval`]: BreathingSession::tick_interval
///
/// # Example
///
/// ```rust
/// use breathwork::clock::ManualClock;
/// use breathwork::core::presets;
/// use breathwork::session::BreathingSession;
/// use std::time::Duration;
///
/// let time = ManualClock::default();
/// let mut session = BreathingSession::builder()
///     .technique(presets::box_breathing())
///     .target_duration(64)
///     .time_source(time.clone())
///     .build()
///     .unwrap();
///
/// assert!(session.start());
/// time.advance(Duration::from_secs(5));
/// session.tick();
/// assert_eq!(session.state().current_cycle, 1);
///
/// let result = session.stop().unwrap();
/// assert!(!result.completed);
/// assert!(session.stop().is_none());
/// ```
pub struct BreathingSession<T: TimeSource = WallClock> {
    technique: Arc<TechniqueDefinition>,
    clock: SessionClock<T>,
    state: SessionState,
    scale_range: ScaleRange,
    evaluator: CompletionEvaluator,
    tick_interval: Duration,
    observers: Vec<Box<dyn SessionObserver>>,
    history: StateHistory<BreathPhase>,
    result: Option<SessionResult>,
    session_id: Option<Uuid>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    pause_count: u32,
}

impl BreathingSession<WallClock> {
    /// Session on the system clock with the default configuration.
    pub fn new(
        technique: impl Into<Arc<TechniqueDefinition>>,
        target_duration_seconds: u32,
    ) -> Result<Self, BuildError> {
        SessionBuilder::new()
            .technique(technique)
            .target_duration(target_duration_seconds)
            .build()
    }

    pub fn builder() -> SessionBuilder<WallClock> {
        SessionBuilder::new()
    }
}

impl<T: TimeSource> BreathingSession<T> {
    pub(crate) fn from_parts(
        technique: Arc<TechniqueDefinition>,
        target_duration_seconds: u32,
        config: &SessionConfig,
        time_source: T,
        observers: Vec<Box<dyn SessionObserver>>,
    ) -> Self {
        let total_cycles = technique.cycles_within(target_duration_seconds);
        Self {
            technique,
            clock: SessionClock::new(time_source),
            state: SessionState::ready(target_duration_seconds, total_cycles),
            scale_range: config.scale_range(),
            evaluator: CompletionEvaluator::new(config.completion_threshold_percent),
            tick_interval: config.tick_interval(),
            observers,
            history: StateHistory::new(),
            result: None,
            session_id: None,
            started_at: None,
            ended_at: None,
            pause_count: 0,
        }
    }

    /// Begin the session. Only valid from `ready`.
    pub fn start(&mut self) -> bool {
        if !self.state.is_ready() {
            return false;
        }

        self.clock.start();
        self.session_id = Some(Uuid::new_v4());
        self.started_at = Some(self.clock.now());

        let position = calculator::locate(&self.technique, 0.0);
        self.state.is_active = true;
        self.state.is_paused = false;
        self.state.current_cycle = self.state.total_cycles.min(1);
        self.state.elapsed_time_seconds = 0.0;
        self.state.remaining_time_seconds = f64::from(self.state.target_duration_seconds);
        self.state.phase = position.phase;
        self.state.phase_progress_percent = position.progress_percent;
        self.state.phase_remaining_seconds = position.remaining_whole_seconds();

        info!(
            technique = %self.technique.name(),
            target = self.state.target_duration_seconds,
            total_cycles = self.state.total_cycles,
            "breathing session started"
        );

        let change = self.record_transition(BreathPhase::Ready, position.phase);
        self.notify_phase_change(&change);
        true
    }

    /// Refresh the session from the clock.
    ///
    /// Call on a fixed interval while the session is running. Ticks are
    /// ignored while paused or inactive.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Idle;
        }
        let outcome = self.advance();
        trace!(
            elapsed = self.state.elapsed_time_seconds,
            phase = %self.state.phase,
            progress = self.state.phase_progress_percent,
            "tick"
        );
        outcome
    }

    /// Suspend interpretation of wall-clock time.
    ///
    /// Returns `false` if the session was not running, or if the final
    /// clock sample completed it.
    pub fn pause(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        if let TickOutcome::Completed(_) = self.advance() {
            return false;
        }

        self.state.is_paused = true;
        self.pause_count += 1;
        info!(
            elapsed = self.state.elapsed_time_seconds,
            cycle = self.state.current_cycle,
            "breathing session paused"
        );
        true
    }

    /// Continue exactly where `pause` left off.
    pub fn resume(&mut self) -> bool {
        if !self.state.is_active || !self.state.is_paused {
            return false;
        }

        self.clock
            .resume_from(Duration::from_secs_f64(self.state.elapsed_time_seconds));
        self.state.is_paused = false;
        info!(
            elapsed = self.state.elapsed_time_seconds,
            "breathing session resumed"
        );
        true
    }

    /// End the session early and score it.
    ///
    /// Returns `None` when no session is active, so a second call after a
    /// stop or natural completion reports nothing and changes nothing.
    pub fn stop(&mut self) -> Option<SessionResult> {
        if !self.state.is_active {
            return None;
        }

        if !self.state.is_paused {
            if let TickOutcome::Completed(result) = self.advance() {
                return Some(result);
            }
        }

        let elapsed = self.state.elapsed_time_seconds;
        Some(self.finish(elapsed, false))
    }

    /// Return to `ready` with every counter zeroed. Valid from any state.
    pub fn reset(&mut self) {
        self.clock.clear();
        self.state = SessionState::ready(self.state.target_duration_seconds, self.state.total_cycles);
        self.history = StateHistory::new();
        self.result = None;
        self.session_id = None;
        self.started_at = None;
        self.ended_at = None;
        self.pause_count = 0;
        info!(technique = %self.technique.name(), "breathing session reset");
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    /// Breathing-circle scale for the current phase and progress.
    pub fn scale(&self) -> f64 {
        scale::breathing_scale(
            self.state.phase,
            self.state.phase_progress_percent,
            self.scale_range,
        )
    }

    /// Cue text for the current phase.
    pub fn instruction(&self) -> &'static str {
        self.state.phase.instruction()
    }

    pub fn technique(&self) -> &Arc<TechniqueDefinition> {
        &self.technique
    }

    /// Recommended polling period for the caller's scheduler.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn history(&self) -> &StateHistory<BreathPhase> {
        &self.history
    }

    /// Result of the session once it has ended.
    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn pause_count(&self) -> u32 {
        self.pause_count
    }

    /// Value object for the caller's storage collaborator, once ended.
    pub fn report(&self) -> Option<SessionReport> {
        let (Some(result), Some(id), Some(started_at), Some(ended_at)) =
            (self.result, self.session_id, self.started_at, self.ended_at)
        else {
            return None;
        };

        Some(SessionReport::new(
            id,
            self.technique.name(),
            self.state.target_duration_seconds,
            started_at,
            ended_at,
            self.pause_count,
            result,
            self.history.clone(),
        ))
    }

    /// Sample the clock and update every derived field.
    fn advance(&mut self) -> TickOutcome {
        let sampled = self.clock.elapsed().as_secs_f64();
        let elapsed = sampled.max(self.state.elapsed_time_seconds);
        let target = f64::from(self.state.target_duration_seconds);

        if elapsed >= target {
            return TickOutcome::Completed(self.finish(target, true));
        }

        let cycle_seconds = self.technique.cycle_duration_seconds();
        let t_in_cycle = elapsed % cycle_seconds as f64;
        let position = calculator::locate(&self.technique, t_in_cycle);
        let previous = self.state.phase;

        self.state.elapsed_time_seconds = elapsed;
        self.state.remaining_time_seconds = (target - elapsed).max(0.0);
        self.state.current_cycle = whole_cycles(elapsed, cycle_seconds)
            .saturating_add(1)
            .min(self.state.total_cycles);
        self.state.phase = position.phase;
        self.state.phase_progress_percent = position.progress_percent;
        self.state.phase_remaining_seconds = position.remaining_whole_seconds();

        if position.phase == previous {
            return TickOutcome::Progressed;
        }

        let change = self.record_transition(previous, position.phase);
        self.notify_phase_change(&change);
        TickOutcome::PhaseChanged(change)
    }

    /// Move to `complete`, score the session and notify observers.
    fn finish(&mut self, elapsed: f64, finished_naturally: bool) -> SessionResult {
        let result = self.evaluator.evaluate(CompletionInput {
            elapsed_seconds: elapsed,
            target_seconds: self.state.target_duration_seconds,
            cycle_seconds: self.technique.cycle_duration_seconds(),
            total_cycles: self.state.total_cycles,
            finished_naturally,
        });

        let previous = self.state.phase;
        self.state.phase = BreathPhase::Complete;
        self.state.is_active = false;
        self.state.is_paused = false;
        self.state.elapsed_time_seconds = elapsed;
        self.state.remaining_time_seconds =
            (f64::from(self.state.target_duration_seconds) - elapsed).max(0.0);
        if finished_naturally {
            self.state.current_cycle = self.state.total_cycles;
            self.state.phase_progress_percent = 100.0;
            self.state.phase_remaining_seconds = 0;
        }

        self.record_transition(previous, BreathPhase::Complete);
        self.ended_at = Some(self.clock.now());
        self.clock.clear();
        self.result = Some(result);

        info!(
            technique = %self.technique.name(),
            elapsed = result.duration_seconds,
            cycles = result.cycles_completed,
            percentage = result.completed_percentage,
            completed = result.completed,
            natural = finished_naturally,
            "breathing session ended"
        );

        for observer in &mut self.observers {
            observer.on_complete(&result);
        }
        result
    }

    fn record_transition(&mut self, from: BreathPhase, to: BreathPhase) -> PhaseChange {
        let change = PhaseChange {
            from,
            to,
            cycle: self.state.current_cycle,
            elapsed_seconds: self.state.elapsed_time_seconds,
        };
        self.history = self.history.record(StateTransition {
            from,
            to,
            timestamp: self.clock.now(),
            cycle: change.cycle,
            elapsed_seconds: change.elapsed_seconds,
        });
        debug!(
            from = %from,
            to = %to,
            cycle = change.cycle,
            elapsed = change.elapsed_seconds,
            "phase transition"
        );
        change
    }

    fn notify_phase_change(&mut self, change: &PhaseChange) {
        for observer in &mut self.observers {
            observer.on_phase_change(change);
        }
    }
}
