//! System configuration - root configuration structure.

use serde::Deserialize;

use super::chain::ChainConfig;
use super::motors::MotorBankConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Register-chain wiring configuration.
    #[serde(default)]
    pub chain: ChainConfig,

    /// Motor bank configuration.
    pub motors: MotorBankConfig,
}
