//! Bus module for shift-stepper.
//!
//! Provides the serial transport to the cascaded shift registers.

mod shift;

pub use shift::{NoPin, ShiftBus};
