//! Session clock and the time sources behind it.
//!
//! The clock is anchored to wall-clock time: elapsed time is always
//! `now - anchor`, never a sum of nominal tick increments, so a late or
//! throttled tick cannot make displayed time drift from real time.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Source of the current wall-clock instant.
pub trait TimeSource {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for tests and simulations.
///
/// Clones share the same instant, so a test can keep one handle and move
/// time forward underneath a session that owns another.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        let delta = chrono::Duration::from_std(by).unwrap_or_else(|_| chrono::Duration::zero());
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += delta;
    }

    /// Move time forward by fractional seconds.
    pub fn advance_secs(&self, seconds: f64) {
        self.advance(Duration::from_secs_f64(seconds.max(0.0)));
    }

    /// Jump to an arbitrary instant, including one in the past.
    pub fn set(&self, instant: DateTime<Utc>) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now = instant;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Wall-clock anchored elapsed-time tracker.
#[derive(Clone, Debug)]
pub struct SessionClock<T: TimeSource> {
    source: T,
    anchor: Option<DateTime<Utc>>,
}

impl<T: TimeSource> SessionClock<T> {
    pub fn new(source: T) -> Self {
        Self {
            source,
            anchor: None,
        }
    }

    /// Anchor the clock at the current instant.
    pub fn start(&mut self) {
        self.anchor = Some(self.source.now());
    }

    /// Time since the anchor.
    ///
    /// Zero before `start` and whenever the wall clock reads earlier than
    /// the anchor.
    pub fn elapsed(&self) -> Duration {
        match self.anchor {
            Some(anchor) => self
                .source
                .now()
                .signed_duration_since(anchor)
                .to_std()
                .unwrap_or(Duration::ZERO),
            None => Duration::ZERO,
        }
    }

    /// Re-anchor so that `elapsed()` continues from `previous` right now.
    ///
    /// Time that passed while the session was paused is dropped, and time
    /// accrued before the pause is kept exactly.
    pub fn resume_from(&mut self, previous: Duration) {
        let previous =
            chrono::Duration::from_std(previous).unwrap_or_else(|_| chrono::Duration::zero());
        self.anchor = Some(self.source.now() - previous);
    }

    /// Drop the anchor.
    pub fn clear(&mut self) {
        self.anchor = None;
    }

    pub fn is_started(&self) -> bool {
        self.anchor.is_some()
    }

    /// Current instant of the underlying time source.
    pub fn now(&self) -> DateTime<Utc> {
        self.source.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> (ManualClock, SessionClock<ManualClock>) {
        let time = ManualClock::default();
        (time.clone(), SessionClock::new(time))
    }

    #[test]
    fn elapsed_is_zero_before_start() {
        let (time, clock) = clock();
        time.advance(Duration::from_secs(30));
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert!(!clock.is_started());
    }

    #[test]
    fn elapsed_tracks_wall_clock_not_polls() {
        let (time, mut clock) = clock();
        clock.start();
        time.advance(Duration::from_millis(2_500));
        assert_eq!(clock.elapsed(), Duration::from_millis(2_500));
        assert_eq!(clock.elapsed(), Duration::from_millis(2_500));
    }

    #[test]
    fn resume_from_preserves_accrued_time() {
        let (time, mut clock) = clock();
        clock.start();
        time.advance(Duration::from_secs(10));
        let paused_at = clock.elapsed();

        time.advance(Duration::from_secs(100));
        clock.resume_from(paused_at);
        assert_eq!(clock.elapsed(), Duration::from_secs(10));

        time.advance(Duration::from_secs(5));
        assert_eq!(clock.elapsed(), Duration::from_secs(15));
    }

    #[test]
    fn backwards_wall_clock_reads_zero() {
        let (time, mut clock) = clock();
        let start = time.now();
        clock.start();
        time.set(start - chrono::Duration::seconds(20));
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn clear_drops_anchor() {
        let (time, mut clock) = clock();
        clock.start();
        time.advance(Duration::from_secs(3));
        clock.clear();
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn wall_clock_moves_forward() {
        let mut clock = SessionClock::new(WallClock);
        clock.start();
        std::thread::sleep(Duration::from_millis(5));
        assert!(clock.elapsed() >= Duration::from_millis(5));
    }
}
