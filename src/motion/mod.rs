//! Motion module for shift-stepper.
//!
//! Provides speed-to-interval conversion and the step-rate gate.

mod gate;
mod speed;

pub use gate::StepGate;
pub use speed::StepInterval;
