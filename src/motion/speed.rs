//! Speed-to-interval conversion.
//!
//! Human-facing speed units become a microsecond delay between step frames,
//! which is what the timing gate actually enforces.

use core::f32::consts::TAU;

use crate::config::units::{RadPerSec, RevPerMin};

/// Minimum pause between two step frames, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepInterval(u64);

impl StepInterval {
    /// Interval from revolutions per minute.
    ///
    /// One revolution is `steps_per_revolution` steps, so
    /// `interval_us * steps_per_revolution * rpm = 60_000_000`.
    ///
    /// Returns `None` for a zero speed or zero steps-per-revolution, which
    /// have no finite interval.
    pub fn from_rev_per_min(steps_per_revolution: u16, speed: RevPerMin) -> Option<Self> {
        if steps_per_revolution == 0 || speed.0 == 0 {
            return None;
        }
        Some(Self(
            60_000_000 / (steps_per_revolution as u64 * speed.0 as u64),
        ))
    }

    /// Interval from radians per second.
    ///
    /// One revolution is TAU radians:
    /// `interval_us * steps_per_revolution * (rad_per_sec / TAU) = 1_000_000`.
    pub fn from_rad_per_sec(steps_per_revolution: u16, speed: RadPerSec) -> Option<Self> {
        if steps_per_revolution == 0 || speed.0 <= 0.0 {
            return None;
        }
        let micros = TAU * 1_000_000.0 / (steps_per_revolution as f32 * speed.0);
        Some(Self(micros as u64))
    }

    /// The interval in microseconds.
    #[inline]
    pub const fn as_micros(self) -> u64 {
        self.0
    }
}
