//! Time sources for elapsed run time
//!
//! Elapsed time is read from a clock rather than summed from clamped `dt`,
//! so frame hitches never make the displayed time drift.

use std::time::Instant;

/// Monotonic seconds since an arbitrary origin
pub trait Clock {
    fn now_secs(&self) -> f64;
}

/// Wall-clock time backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to (tests, headless drivers)
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward; negative or non-finite amounts are ignored
    pub fn advance(&mut self, secs: f64) {
        if secs.is_finite() && secs > 0.0 {
            self.now += secs;
        }
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now
    }
}
