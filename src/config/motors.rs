//! Motor bank configuration from TOML.

use serde::Deserialize;

use crate::motor::DriveMode;

use super::units::RevPerMin;

/// Configuration shared by every motor on the chain.
///
/// The chain drives identical motors in identical mode; per-motor state is
/// only the position counter.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorBankConfig {
    /// Number of motors on the chain.
    pub count: u16,

    /// Steps per mechanical revolution (typically 200 for 1.8° motors,
    /// 2048 for geared 28BYJ-48 units).
    pub steps_per_revolution: u16,

    /// Coil drive sequence.
    #[serde(default)]
    pub drive_mode: DriveMode,

    /// Initial step rate in revolutions per minute.
    #[serde(default, rename = "speed_rev_per_min")]
    pub speed: RevPerMin,
}
