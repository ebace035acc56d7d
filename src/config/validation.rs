//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::motor::MAX_MOTORS;

use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Bits per motor fits one register stage (1-8)
/// - Motor count is nonzero and within the position table capacity
/// - Steps per revolution is nonzero
/// - Initial speed is nonzero
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    let bits = config.chain.bits_per_motor;
    if !(1..=8).contains(&bits) {
        return Err(Error::Config(ConfigError::InvalidBitsPerMotor(bits)));
    }

    let count = config.motors.count;
    if count == 0 || count as usize > MAX_MOTORS {
        return Err(Error::Config(ConfigError::InvalidMotorCount(count)));
    }

    if config.motors.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)));
    }

    if config.motors.speed.0 == 0 {
        return Err(Error::Config(ConfigError::InvalidSpeed(0)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::RevPerMin;
    use crate::config::{ChainConfig, MotorBankConfig};
    use crate::motor::DriveMode;

    fn make_config() -> SystemConfig {
        SystemConfig {
            chain: ChainConfig::default(),
            motors: MotorBankConfig {
                count: 8,
                steps_per_revolution: 200,
                drive_mode: DriveMode::FullStep,
                speed: RevPerMin(60),
            },
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(validate_config(&make_config()).is_ok());
    }

    #[test]
    fn zero_motor_count_is_rejected() {
        let mut config = make_config();
        config.motors.count = 0;
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidMotorCount(0)))
        ));
    }

    #[test]
    fn oversized_motor_count_is_rejected() {
        let mut config = make_config();
        config.motors.count = MAX_MOTORS as u16 + 1;
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidMotorCount(_)))
        ));
    }

    #[test]
    fn bits_per_motor_must_fit_one_register() {
        for bits in [0u8, 9, 16] {
            let mut config = make_config();
            config.chain.bits_per_motor = bits;
            assert!(matches!(
                validate_config(&config),
                Err(Error::Config(ConfigError::InvalidBitsPerMotor(_)))
            ));
        }
    }

    #[test]
    fn zero_speed_is_rejected() {
        let mut config = make_config();
        config.motors.speed = RevPerMin(0);
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidSpeed(0)))
        ));
    }
}
