//! Chain (bus geometry) configuration from TOML.

use heapless::String;
use serde::Deserialize;

/// Wiring-level configuration for one register chain.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// Human-readable name (max 32 chars).
    #[serde(default)]
    pub name: String<32>,

    /// How many pattern bits are wired out per motor (1-8).
    #[serde(default = "default_bits_per_motor")]
    pub bits_per_motor: u8,
}

fn default_bits_per_motor() -> u8 {
    4
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            bits_per_motor: default_bits_per_motor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_four_lines() {
        assert_eq!(ChainConfig::default().bits_per_motor, 4);
    }
}
