//! End-to-end session scenarios driven by a manual clock.

use breathwork::core::completion::CompletionEvaluator;
use breathwork::core::{presets, BreathPhase, PhaseDurations, SessionResult};
use breathwork::session::{PhaseChange, SessionEvent, SessionObserver, TickOutcome};
use breathwork::{BreathingSession, ManualClock, SessionReport, TechniqueDefinition};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Counts haptic pulses the way a vibration device would receive them.
#[derive(Clone, Default)]
struct HapticProbe {
    pulses: Arc<Mutex<Vec<BreathPhase>>>,
    completions: Arc<Mutex<Vec<SessionResult>>>,
}

impl SessionObserver for HapticProbe {
    fn on_phase_change(&mut self, change: &PhaseChange) {
        self.pulses.lock().unwrap().push(change.to);
    }

    fn on_complete(&mut self, result: &SessionResult) {
        self.completions.lock().unwrap().push(*result);
    }
}

fn session_with(
    durations: PhaseDurations,
    target: u32,
    probe: HapticProbe,
) -> (ManualClock, BreathingSession<ManualClock>) {
    let time = ManualClock::default();
    let session = BreathingSession::builder()
        .technique(TechniqueDefinition::new("scenario", durations).unwrap())
        .target_duration(target)
        .time_source(time.clone())
        .observer(probe)
        .build()
        .unwrap();
    (time, session)
}

fn run_ticks(time: &ManualClock, session: &mut BreathingSession<ManualClock>, ticks: usize) {
    for _ in 0..ticks {
        time.advance(Duration::from_millis(100));
        session.tick();
    }
}

#[test]
fn haptic_fires_once_per_transition_not_per_tick() {
    let probe = HapticProbe::default();
    let (time, mut session) = session_with(PhaseDurations::new(4, 2, 4, 2), 600, probe.clone());

    session.start();
    // 24 seconds of 100 ms ticks: two full cycles.
    run_ticks(&time, &mut session, 240);

    let pulses = probe.pulses.lock().unwrap().clone();
    assert_eq!(
        pulses,
        vec![
            BreathPhase::Inhale,
            BreathPhase::InhaleHold,
            BreathPhase::Exhale,
            BreathPhase::ExhaleHold,
            BreathPhase::Inhale,
            BreathPhase::InhaleHold,
            BreathPhase::Exhale,
            BreathPhase::ExhaleHold,
            BreathPhase::Inhale,
        ]
    );
    assert_eq!(session.state().current_cycle, 3);
}

#[test]
fn pause_resume_survives_backgrounding() {
    let (time, mut session) = session_with(PhaseDurations::new(4, 4, 4, 4), 300, HapticProbe::default());

    session.start();
    time.advance(Duration::from_secs(10));
    session.tick();
    session.pause();

    // Tab in the background: the wall clock keeps moving.
    time.advance(Duration::from_secs(100));
    session.tick();

    session.resume();
    time.advance(Duration::from_secs(5));
    session.tick();

    assert_eq!(session.state().elapsed_time_seconds, 15.0);
    assert_eq!(session.state().remaining_time_seconds, 285.0);
}

#[test]
fn throttled_ticks_do_not_drift() {
    let (time, mut session) = session_with(PhaseDurations::new(4, 4, 4, 4), 300, HapticProbe::default());
    session.start();

    // Ticks arrive late and irregularly; elapsed time follows the clock, not the tick count.
    for late in [100, 1_000, 250, 4_000, 100, 1_750] {
        time.advance(Duration::from_millis(late));
        session.tick();
    }

    assert!((session.state().elapsed_time_seconds - 7.2).abs() < 1e-9);
    assert_eq!(session.state().phase, BreathPhase::InhaleHold);
}

#[test]
fn stopping_at_94_and_95_percent() {
    for (seconds, expected) in [(94, false), (95, true)] {
        let (time, mut session) = session_with(PhaseDurations::new(4, 4, 4, 4), 100, HapticProbe::default());
        session.start();
        time.advance(Duration::from_secs(seconds));
        session.tick();

        let result = session.stop().unwrap();
        assert_eq!(u64::from(result.completed_percentage), seconds);
        assert_eq!(result.completed, expected, "stopped at {seconds}%");
    }
}

#[test]
fn short_target_still_completes() {
    let probe = HapticProbe::default();
    let (time, mut session) = session_with(PhaseDurations::new(4, 7, 8, 0), 12, probe.clone());
    assert_eq!(session.state().total_cycles, 0);

    session.start();
    run_ticks(&time, &mut session, 120);

    let state = session.state();
    assert_eq!(state.phase, BreathPhase::Complete);
    assert_eq!(state.elapsed_time_seconds, 12.0);
    assert_eq!(state.current_cycle, 0);

    let completions = probe.completions.lock().unwrap().clone();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].cycles_completed, 0);
    assert!(completions[0].completed);
}

#[test]
fn two_phase_technique_wraps_to_inhale() {
    let (time, mut session) = session_with(PhaseDurations::new(4, 0, 4, 0), 60, HapticProbe::default());
    session.start();

    time.advance(Duration::from_secs(4));
    session.tick();
    assert_eq!(session.state().phase, BreathPhase::Exhale);

    time.advance(Duration::from_secs(4));
    session.tick();
    assert_eq!(session.state().phase, BreathPhase::Inhale);
    assert_eq!(session.state().current_cycle, 2);
}

#[test]
fn stop_is_idempotent() {
    let probe = HapticProbe::default();
    let (time, mut session) = session_with(PhaseDurations::new(4, 4, 4, 4), 120, probe.clone());
    session.start();
    time.advance(Duration::from_secs(50));

    let first = session.stop();
    let frozen = session.snapshot();
    let second = session.stop();

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(session.snapshot(), frozen);
    assert_eq!(probe.completions.lock().unwrap().len(), 1);
    assert_eq!(first.unwrap().cycles_completed, 3);
}

#[test]
fn stop_at_the_target_reports_natural_completion() {
    let (time, mut session) = session_with(PhaseDurations::new(4, 4, 4, 4), 32, HapticProbe::default());
    session.start();
    time.advance(Duration::from_secs(40));

    let result = session.stop().unwrap();
    assert_eq!(result.completed_percentage, 100);
    assert_eq!(result.cycles_completed, 2);
    assert_eq!(session.state().elapsed_time_seconds, 32.0);
}

#[test]
fn scale_breathes_with_the_session() {
    let (time, mut session) = session_with(PhaseDurations::new(4, 4, 4, 4), 120, HapticProbe::default());
    assert_eq!(session.scale(), 1.0);

    session.start();
    let mut previous = session.scale();
    for _ in 0..39 {
        time.advance(Duration::from_millis(100));
        session.tick();
        assert!(session.scale() >= previous);
        previous = session.scale();
    }

    time.advance(Duration::from_secs(1));
    session.tick();
    assert_eq!(session.state().phase, BreathPhase::InhaleHold);
    assert!((session.scale() - 1.3).abs() < 1e-9);
}

#[test]
fn shared_technique_drives_independent_sessions() {
    let technique = Arc::new(presets::box_breathing());
    let time = ManualClock::default();

    let mut first = BreathingSession::builder()
        .technique(Arc::clone(&technique))
        .target_duration(64)
        .time_source(time.clone())
        .build()
        .unwrap();
    let mut second = BreathingSession::builder()
        .technique(Arc::clone(&technique))
        .target_duration(64)
        .time_source(time.clone())
        .build()
        .unwrap();

    first.start();
    time.advance(Duration::from_secs(6));
    second.start();
    time.advance(Duration::from_secs(2));
    first.tick();
    second.tick();

    assert_eq!(first.state().phase, BreathPhase::Exhale);
    assert_eq!(second.state().phase, BreathPhase::Inhale);
    assert_eq!(Arc::strong_count(&technique), 3);
}

#[test]
fn channel_observer_and_report_for_storage() {
    let (tx, rx) = mpsc::channel();
    let time = ManualClock::default();
    let mut session = BreathingSession::builder()
        .technique(presets::coherent())
        .target_duration(30)
        .time_source(time.clone())
        .observer(tx)
        .build()
        .unwrap();

    session.start();
    for _ in 0..300 {
        time.advance(Duration::from_millis(100));
        if let TickOutcome::Completed(_) = session.tick() {
            break;
        }
    }

    let events: Vec<SessionEvent> = rx.try_iter().collect();
    let completed = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::Completed(_)))
        .count();
    assert_eq!(completed, 1);

    let report = session.report().unwrap();
    assert_eq!(report.result.cycles_completed, 3);
    assert_eq!(report.breaths_taken(), 3);
    assert_eq!(report.technique, "Coherent Breathing");

    let stored = report.to_json().unwrap();
    assert_eq!(SessionReport::from_json(&stored).unwrap(), report);
}

#[test]
fn custom_threshold_flows_from_config() {
    let time = ManualClock::default();
    let mut session = BreathingSession::builder()
        .technique(presets::box_breathing())
        .target_duration(100)
        .config(breathwork::SessionConfig {
            completion_threshold_percent: 80,
            ..Default::default()
        })
        .time_source(time.clone())
        .build()
        .unwrap();

    session.start();
    time.advance(Duration::from_secs(80));
    assert!(session.stop().unwrap().completed);
    assert_eq!(CompletionEvaluator::default().threshold_percent(), 95);
}
