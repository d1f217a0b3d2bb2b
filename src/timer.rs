//! Fixed-interval tick source for `ControlFlow::WaitUntil`.

use std::time::{Duration, Instant};

/// Periodic timer driven by the event loop.
///
/// The loop waits until [`FrameTimer::deadline`], then calls
/// [`FrameTimer::poll`]; a `true` result means one tick is due. Missed ticks
/// are not replayed: after a stall the next deadline is re-anchored on `now`.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    interval: Duration,
    next: Instant,
    ticks: u64,
}

impl FrameTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
            ticks: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant the event loop should sleep until
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Total ticks fired so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns `true` (once) if the deadline has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        self.ticks += 1;
        self.next += self.interval;
        if self.next <= now {
            // Fell behind by more than one interval
            self.next = now + self.interval;
        }
        true
    }
}
