//=========================================================================
// Frame Clock
//=========================================================================
//
// Canonical wall-clock timing for the frame loop.
//
// The clock is sampled once per tick and produces a `TimeSample` holding
// seconds since the loop started and seconds since the previous tick.
// Callers pass `Instant`s in explicitly so the driver stays testable.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

//=== TimeSample ==========================================================

/// Time information handed to every render callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeSample {
    /// Seconds since the loop started.
    pub elapsed: f64,

    /// Seconds since the previous tick.
    pub delta: f64,
}

//=== FrameClock ==========================================================

/// Tracks loop start and previous-tick instants.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
    previous: Instant,
}

impl FrameClock {
    pub fn new(start: Instant) -> Self {
        Self {
            start,
            previous: start,
        }
    }

    /// Produces the sample for a tick at `now` and advances the clock.
    ///
    /// An `Instant` earlier than the previous sample yields a zero delta
    /// rather than a negative one.
    pub fn sample(&mut self, now: Instant) -> TimeSample {
        let sample = TimeSample {
            elapsed: now.saturating_duration_since(self.start).as_secs_f64(),
            delta: now.saturating_duration_since(self.previous).as_secs_f64(),
        };
        self.previous = now.max(self.previous);
        sample
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
