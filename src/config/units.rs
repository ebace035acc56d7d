//! Unit types for speed quantities.
//!
//! Newtype wrappers keep the two human-facing speed units from being mixed
//! up at call sites; both convert to the same microsecond step interval.

use serde::Deserialize;

/// Rotational speed in revolutions per minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RevPerMin(pub u32);

impl RevPerMin {
    /// Create a new RevPerMin value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Default for RevPerMin {
    fn default() -> Self {
        // The chain starts at a sedate 60 r/min until told otherwise.
        Self(60)
    }
}

/// Rotational speed in radians per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct RadPerSec(pub f32);

impl RadPerSec {
    /// Create a new RadPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_speed_is_sixty_rpm() {
        assert_eq!(RevPerMin::default(), RevPerMin(60));
    }
}
