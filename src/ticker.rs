use std::time::{Duration, Instant};

/// Default tick interval in milliseconds (redraw, clock, outcome drain)
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Fixed-interval refresh schedule
#[derive(Debug, Clone)]
pub struct PollTimer {
    interval: Duration,
    last: Instant,
}

impl PollTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    /// True once per elapsed interval; restarts the interval when it fires
    pub fn fire(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Push the next poll a full interval out (after an on-demand refresh)
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }
}
