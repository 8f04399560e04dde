//! Time source and the session countdown.
//!
//! The countdown is polled, not scheduled: the driver sends a tick every
//! poll interval and the session compares elapsed time against the limit.
//! Expiry can therefore be noticed up to one interval late.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same offset.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock { origin: Instant::now(), offset: Rc::new(Cell::new(Duration::ZERO)) }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

/// Started once per round; dropped with it.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    started_at: Instant,
    limit: Duration,
}

impl Countdown {
    pub fn start(now: Instant, limit: Duration) -> Self {
        Countdown { started_at: now, limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    /// Whole seconds left, rounded up, floored at zero.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let left = self.limit.saturating_sub(self.elapsed(now));
        let secs = left.as_secs();
        if left.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.limit
    }
}
