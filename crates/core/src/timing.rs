//! Tick timer - turns per-frame elapsed time into discrete gravity ticks.
//!
//! The host calls [`TickTimer::update`] once per frame with the frame's
//! elapsed milliseconds. Once the accumulated time exceeds the interval the
//! timer fires a single tick and starts over from zero, so one call never
//! produces more than one tick no matter how long the frame was.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickTimer {
    interval_ms: u32,
    accumulated_ms: u32,
}

impl TickTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            accumulated_ms: 0,
        }
    }

    pub fn accumulated_ms(&self) -> u32 {
        self.accumulated_ms
    }

    /// Add `dt_ms`; returns true when a tick is due.
    pub fn update(&mut self, dt_ms: u32) -> bool {
        self.accumulated_ms = self.accumulated_ms.saturating_add(dt_ms);
        if self.accumulated_ms > self.interval_ms {
            self.accumulated_ms = 0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }
}
