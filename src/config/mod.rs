//! Configuration module for shift-stepper.
//!
//! Provides types for loading and validating chain and motor-bank
//! configurations from TOML files (with `std` feature) or pre-parsed data.

mod chain;
#[cfg(feature = "std")]
mod loader;
mod motors;
mod system;
pub mod units;
mod validation;

pub use chain::ChainConfig;
pub use motors::MotorBankConfig;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{RadPerSec, RevPerMin};
