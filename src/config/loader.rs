//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use shift_stepper::load_config;
///
/// let config = load_config("chain.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[motors]
count = 16
steps_per_revolution = 200
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.motors.count, 16);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[chain]
name = "front panel"
bits_per_motor = 4

[motors]
count = 100
steps_per_revolution = 2048
drive_mode = "half_step"
speed_rev_per_min = 12
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.chain.name.as_str(), "front panel");
        assert_eq!(config.motors.count, 100);
        assert_eq!(config.motors.steps_per_revolution, 2048);
    }

    #[test]
    fn test_parse_rejects_invalid_geometry() {
        let toml = r#"
[chain]
bits_per_motor = 12

[motors]
count = 4
steps_per_revolution = 200
"#;

        assert!(parse_config(toml).is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_config("/nonexistent/chain.toml");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::IoError(_)))
        ));
    }
}
