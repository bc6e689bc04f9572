//! A manually started and stopped interval timer.

use std::time::Duration;

use klotho_core::{KlothoError, Result};
use tracing::trace;

use crate::clock::{Clock, MonotonicClock};

/// Measures the time between a [`start`](Self::start) and a
/// [`stop`](Self::stop).
///
/// Only the most recently completed interval is kept. The chronometer takes
/// `&mut self` for every state change and is meant to be owned by the single
/// thread doing the measuring.
///
/// # Examples
///
/// ```
/// use klotho_metrics::Chronometer;
///
/// let mut chrono = Chronometer::new();
/// chrono.start();
/// let total: u64 = (0..1_000).sum();
/// chrono.stop().unwrap();
///
/// assert_eq!(total, 499_500);
/// assert!(chrono.try_duration().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Chronometer<C: Clock = MonotonicClock> {
    clock: C,
    start: Duration,
    finish: Duration,
    started: bool,
    completed: bool,
}

impl Chronometer<MonotonicClock> {
    /// Create an idle chronometer reading the monotonic clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for Chronometer<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Chronometer<C> {
    /// Create an idle chronometer reading `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            start: Duration::ZERO,
            finish: Duration::ZERO,
            started: false,
            completed: false,
        }
    }

    /// Begin an interval. Restarts the current interval if already running.
    pub fn start(&mut self) {
        self.start = self.clock.now();
        self.started = true;
    }

    /// End the running interval and return its length.
    ///
    /// # Errors
    ///
    /// Returns [`KlothoError::NotStarted`] if no interval is running, either
    /// because `start` was never called or because the interval was already
    /// stopped.
    pub fn stop(&mut self) -> Result<Duration> {
        if !self.started {
            return Err(KlothoError::NotStarted);
        }

        Ok(self.finish())
    }

    /// Length of the most recently completed interval.
    ///
    /// Returns [`Duration::ZERO`] before the first interval completes; use
    /// [`try_duration`](Self::try_duration) to tell that case apart.
    #[must_use]
    pub fn duration(&self) -> Duration {
        if self.completed {
            self.interval()
        } else {
            Duration::ZERO
        }
    }

    /// Length of the most recently completed interval.
    ///
    /// # Errors
    ///
    /// Returns [`KlothoError::NoCompletedInterval`] if no interval has been
    /// stopped yet.
    pub fn try_duration(&self) -> Result<Duration> {
        if self.completed {
            Ok(self.interval())
        } else {
            Err(KlothoError::NoCompletedInterval)
        }
    }

    /// Whether an interval is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started
    }

    /// Time since `start` while running, otherwise the last completed interval.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        if self.started {
            self.clock.now().saturating_sub(self.start)
        } else {
            self.duration()
        }
    }

    /// Run `f` as one interval and return its output with the interval length.
    pub fn time<F, R>(&mut self, f: F) -> (R, Duration)
    where
        F: FnOnce() -> R,
    {
        self.start();
        let out = f();
        (out, self.finish())
    }

    fn finish(&mut self) -> Duration {
        self.finish = self.clock.now();
        self.started = false;
        self.completed = true;

        let elapsed = self.interval();
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        trace!(elapsed_ns = nanos, "interval recorded");
        elapsed
    }

    fn interval(&self) -> Duration {
        self.finish.saturating_sub(self.start)
    }
}
