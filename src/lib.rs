//! # shift-stepper
//!
//! Multi-stepper motor control through cascaded shift registers with
//! embedded-hal 1.0 support.
//!
//! A 74HC595-style register chain turns three GPIO lines (data, shift
//! clock, storage latch) into as many parallel driver outputs as there are
//! cascaded registers. This crate keeps a signed position counter per
//! motor, converts each counter into a coil drive pattern, and streams the
//! patterns down the chain frame by frame, committing them to every motor
//! simultaneously with a single latch pulse.
//!
//! ## Features
//!
//! - **Three wires, hundreds of motors**: chain length is bounded only by
//!   the position table capacity
//! - **embedded-hal 1.0**: `OutputPin` for every line, `DelayNs` for the
//!   clear pulse
//! - **no_std compatible**: core library works without standard library
//! - **Lock-step multi-motor moves**: coordinated deltas without per-motor
//!   timers
//! - **Truncated frames**: idle high-index motors are skipped on the wire
//! - **Configuration-driven**: chain geometry and motor bank in TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shift_stepper::{StepperChainBuilder, RevPerMin};
//!
//! let mut chain = StepperChainBuilder::new()
//!     .data_pin(data)
//!     .clock_pin(clock)
//!     .latch_pin(latch)
//!     .delay(delay)
//!     .clock(micros_clock)
//!     .motor_count(100)
//!     .steps_per_revolution(200)
//!     .build()?;
//!
//! chain.set_speed_rev_per_min(RevPerMin(120));
//! chain.move_many(&[30, -30, 15])?;
//! chain.home()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and `StdClock`
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod bus;
pub mod clock;
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use bus::{NoPin, ShiftBus};
pub use clock::StepClock;
pub use config::{validate_config, SystemConfig};
pub use error::{Error, Result};
pub use motion::{StepGate, StepInterval};
pub use motor::{DriveMode, PositionTable, StepperChain, StepperChainBuilder, MAX_MOTORS};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// OS-backed clock (std only)
#[cfg(feature = "std")]
pub use clock::StdClock;

// Unit types
pub use config::units::{RadPerSec, RevPerMin};
