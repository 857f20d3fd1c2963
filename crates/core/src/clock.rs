//! Clock module - host-driven tickers
//!
//! The engine never reads wall-clock time. A host feeds elapsed milliseconds
//! into a [`Scheduler`], which reports how many drop steps and clock seconds
//! are due. Game over cancels the scheduler; a new session gets a new one.

use crate::types::{BASE_DROP_MS, CLOCK_TICK_MS};

/// Fixed-period accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    interval_ms: u32,
    accumulated_ms: u32,
}

impl Ticker {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            accumulated_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Change the period; time already accumulated carries over
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
    }

    /// Add elapsed time and return how many periods completed
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        let due = self.accumulated_ms / self.interval_ms;
        self.accumulated_ms %= self.interval_ms;
        due
    }

    /// Milliseconds until the next period completes
    pub fn remaining_ms(&self) -> u32 {
        // Accumulated time can exceed a freshly shortened interval.
        self.interval_ms.saturating_sub(self.accumulated_ms)
    }
}

/// Work due after advancing a [`Scheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Due {
    /// Drop steps to run (`Session::tick`)
    pub drops: u32,
    /// Clock seconds to run (`Session::advance_clock`)
    pub seconds: u32,
}

impl Due {
    pub fn is_empty(&self) -> bool {
        self.drops == 0 && self.seconds == 0
    }
}

/// The two periodic drivers of a session: drop steps and the one-second clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduler {
    drop: Ticker,
    clock: Ticker,
    cancelled: bool,
}

impl Scheduler {
    pub fn new(drop_interval_ms: u32) -> Self {
        Self {
            drop: Ticker::new(drop_interval_ms),
            clock: Ticker::new(CLOCK_TICK_MS),
            cancelled: false,
        }
    }

    /// Advance both tickers; a cancelled scheduler never reports work
    pub fn advance(&mut self, elapsed_ms: u32) -> Due {
        if self.cancelled {
            return Due::default();
        }
        Due {
            drops: self.drop.advance(elapsed_ms),
            seconds: self.clock.advance(elapsed_ms),
        }
    }

    /// Follow the session's current drop interval
    pub fn set_drop_interval(&mut self, drop_interval_ms: u32) {
        self.drop.set_interval(drop_interval_ms);
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop.interval_ms()
    }

    /// Stop both drivers for good
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Milliseconds until either driver fires (`None` once cancelled)
    pub fn next_due_ms(&self) -> Option<u32> {
        if self.cancelled {
            return None;
        }
        Some(self.drop.remaining_ms().min(self.clock.remaining_ms()))
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(BASE_DROP_MS)
    }
}
