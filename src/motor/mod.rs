//! Motor module for shift-stepper.
//!
//! Provides the chain driver, coil pattern tables and position tracking.

mod builder;
mod driver;
mod pattern;
mod position;

pub use builder::StepperChainBuilder;
pub use driver::StepperChain;
pub use pattern::DriveMode;
pub use position::{PositionTable, MAX_MOTORS};
