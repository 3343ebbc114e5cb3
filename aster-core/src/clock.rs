//! Injectable clock and repeating tickers.
//!
//! Both engines derive every timestamp and every tick from a [`Clock`]
//! implementation rather than the wall clock, so tests advance a
//! [`VirtualClock`] deterministically instead of sleeping. Production code
//! wires [`SystemClock`].

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Source of "now" for the engines.
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually-advanced time for tests and headless runs.
#[derive(Debug)]
pub struct VirtualClock {
    now: Mutex<DateTime<Utc>>,
}

impl VirtualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Start at the Unix epoch; convenient for tests that only care about deltas.
    pub fn at_epoch() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap() = instant;
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// A repeating timer driven by polling against a [`Clock`].
///
/// A ticker is inert until [`start`](Ticker::start); once running,
/// [`fire`](Ticker::fire) reports at most one elapsed interval per call and
/// schedules the next due time from the current instant, so a long gap
/// between polls does not produce a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<DateTime<Utc>>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true if the interval has elapsed, rescheduling from `now`.
    pub fn fire(&mut self, now: DateTime<Utc>) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_inert_until_started() {
        let clock = VirtualClock::at_epoch();
        let mut ticker = Ticker::new(Duration::seconds(2));
        assert!(!ticker.is_running());
        assert!(!ticker.fire(clock.now()));
    }

    #[test]
    fn ticker_fires_after_interval() {
        let clock = VirtualClock::at_epoch();
        let mut ticker = Ticker::new(Duration::seconds(2));
        ticker.start(clock.now());

        clock.advance(Duration::seconds(1));
        assert!(!ticker.fire(clock.now()));

        clock.advance(Duration::seconds(1));
        assert!(ticker.fire(clock.now()));
    }

    #[test]
    fn ticker_fires_once_per_poll() {
        let clock = VirtualClock::at_epoch();
        let mut ticker = Ticker::new(Duration::seconds(2));
        ticker.start(clock.now());

        // A 10s gap yields a single tick, not five.
        clock.advance(Duration::seconds(10));
        assert!(ticker.fire(clock.now()));
        assert!(!ticker.fire(clock.now()));
    }

    #[test]
    fn stop_cancels_pending_tick() {
        let clock = VirtualClock::at_epoch();
        let mut ticker = Ticker::new(Duration::seconds(2));
        ticker.start(clock.now());
        ticker.stop();

        clock.advance(Duration::seconds(5));
        assert!(!ticker.fire(clock.now()));
    }

    #[test]
    fn virtual_clock_advances() {
        let clock = VirtualClock::at_epoch();
        let t0 = clock.now();
        clock.advance(Duration::milliseconds(800));
        assert_eq!(clock.now() - t0, Duration::milliseconds(800));
    }
}
