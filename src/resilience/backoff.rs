//! Geometric backoff schedule.

use std::time::Duration;

/// Yields `initial`, `initial * m`, `initial * m^2`, ...
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
    multiplier: f64,
}

impl Backoff {
    pub fn new(initial: Duration, multiplier: f64) -> Self {
        Self {
            next: initial,
            multiplier,
        }
    }

    /// Current delay; advances the schedule.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.next;
        self.next = scale(self.next, self.multiplier);
        delay
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        Some(self.next_delay())
    }
}

// Rounds to whole nanoseconds and saturates at `Duration::MAX`.
fn scale(delay: Duration, multiplier: f64) -> Duration {
    if !multiplier.is_finite() || multiplier < 0.0 {
        return delay;
    }
    let nanos = (delay.as_nanos() as f64 * multiplier).round();
    if nanos >= Duration::MAX.as_nanos() as f64 {
        return Duration::MAX;
    }
    let nanos = nanos as u128;
    Duration::new((nanos / 1_000_000_000) as u64, (nanos % 1_000_000_000) as u32)
}
