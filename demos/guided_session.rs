//! Guided Breathing Session
//!
//! This demo drives a real session the way a UI layer would: a single
//! interval timer owned by the caller ticks the session, an observer
//! stands in for the haptic device, and the finished report is printed
//! instead of being sent to storage.
//!
//! Key concepts:
//! - The caller owns the scheduler; the session only reacts to `tick`
//! - Pause/resume keeps elapsed time continuous
//! - Results leave the engine as a value object
//!
//! Run with: RUST_LOG=debug cargo run --example guided_session

use breathwork::core::{PhaseDurations, SessionResult};
use breathwork::session::{BreathingSession, PhaseChange, SessionObserver, TickOutcome};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

struct ConsoleHaptics;

impl SessionObserver for ConsoleHaptics {
    fn on_phase_change(&mut self, change: &PhaseChange) {
        println!(
            "  [buzz] cycle {} -> {} ({})",
            change.cycle,
            change.to,
            change.to.instruction()
        );
    }

    fn on_complete(&mut self, result: &SessionResult) {
        println!(
            "  [buzz buzz] finished at {}% ({} cycles)",
            result.completed_percentage, result.cycles_completed
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Guided Breathing Session ===\n");

    let mut session = BreathingSession::builder()
        .try_technique("Quick Box", PhaseDurations::new(2, 1, 2, 1))?
        .target_duration(15)
        .observer(ConsoleHaptics)
        .build()?;

    let mut interval = tokio::time::interval(session.tick_interval());
    let mut ticks = 0u32;

    session.start();
    loop {
        interval.tick().await;
        ticks += 1;

        // Simulate the app going to the background for two seconds.
        if ticks == 40 {
            session.pause();
            println!("  [paused]");
            tokio::time::sleep(Duration::from_secs(2)).await;
            session.resume();
            println!("  [resumed]");
        }

        match session.tick() {
            TickOutcome::Completed(_) => break,
            TickOutcome::Idle => break,
            TickOutcome::Progressed | TickOutcome::PhaseChanged(_) => {}
        }

        if ticks % 10 == 0 {
            let state = session.state();
            println!(
                "  {:>5.1}s  {:<11} {:>3.0}%  scale {:.2}",
                state.elapsed_time_seconds,
                state.phase,
                state.phase_progress_percent,
                session.scale()
            );
        }
    }

    if let Some(report) = session.report() {
        println!("\nReport for storage:\n{}", report.to_json_pretty()?);
    }

    println!("\n=== Session Complete ===");
    Ok(())
}
