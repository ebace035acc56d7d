//! Step-rate gate.
//!
//! Every broadcast passes through the gate, which blocks until the
//! configured interval has elapsed since the previous broadcast. The wait
//! is a spin on the monotonic clock; the caller is not released early.

use crate::clock::StepClock;

use super::speed::StepInterval;

/// Timing state shared by all motors on one chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepGate {
    last_step_us: u64,
    interval: StepInterval,
}

impl StepGate {
    /// Create a gate armed at `now_us` with a zero interval.
    pub fn new(now_us: u64) -> Self {
        Self {
            last_step_us: now_us,
            interval: StepInterval::default(),
        }
    }

    /// Replace the inter-step interval.
    #[inline]
    pub fn set_interval(&mut self, interval: StepInterval) {
        self.interval = interval;
    }

    /// The current inter-step interval.
    #[inline]
    pub fn interval(&self) -> StepInterval {
        self.interval
    }

    /// Block until the interval has elapsed, then re-arm.
    ///
    /// The subtraction wraps so a clock rollover stalls at most one
    /// interval rather than freezing the chain.
    pub fn wait<C: StepClock>(&mut self, clock: &C) {
        while clock.micros().wrapping_sub(self.last_step_us) < self.interval.as_micros() {}
        self.last_step_us = clock.micros();
    }
}
