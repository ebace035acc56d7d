//! Example: Configuration-driven chain setup.
//!
//! This example demonstrates how to:
//! - Define chain geometry and the motor bank in TOML
//! - Validate the configuration before touching hardware
//! - Build a chain with `from_config`
//!
//! Run with: `cargo run --example config_driven --features std`

use shift_stepper::{parse_config, RevPerMin, StdClock, StepperChainBuilder};

/// Mock output pin for demonstration.
struct MockPin;

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

/// Mock delay provider for demonstration.
struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn main() -> shift_stepper::Result<()> {
    println!("=== Configuration-Driven Chain Example ===\n");

    // A split-flap departure board: geared 28BYJ-48 motors, half stepping
    let toml_content = r#"
[chain]
name = "departure_board"
bits_per_motor = 4

[motors]
count = 48
steps_per_revolution = 2048
drive_mode = "half_step"
speed_rev_per_min = 10
"#;

    // Parse and validate
    let config = parse_config(toml_content)?;

    println!("Chain: {}", config.chain.name);
    println!("  Bits per motor frame: {}", config.chain.bits_per_motor);
    println!("  Motors: {}", config.motors.count);
    println!(
        "  Steps/rev: {} ({:?})",
        config.motors.steps_per_revolution, config.motors.drive_mode
    );
    println!("  Initial speed: {} r/min", config.motors.speed.value());

    // Register chain: one frame per motor per broadcast
    let bits_per_broadcast =
        config.motors.count as u32 * config.chain.bits_per_motor as u32;
    println!("\nFull broadcast: {} bits on the wire", bits_per_broadcast);

    // Build the chain from the configuration
    let mut chain = StepperChainBuilder::new()
        .data_pin(MockPin)
        .clock_pin(MockPin)
        .latch_pin(MockPin)
        .delay(MockDelay)
        .clock(StdClock::new())
        .from_config(&config)
        .build()?;

    println!("\nChain '{}' ready:", chain.name());
    println!("  Step interval: {} us", chain.step_interval().as_micros());

    // Spin the first column of flaps; run fast so the demo finishes quickly
    chain.set_speed_rev_per_min(RevPerMin(3000));
    chain.move_many(&[64, 64, 64, 0, 0, 0])?;
    println!("  Positions (first 6): {:?}", &chain.positions()[..6]);

    chain.home()?;
    println!("  Homed: all counters back to zero");

    println!("\n=== Example Complete ===");

    Ok(())
}
