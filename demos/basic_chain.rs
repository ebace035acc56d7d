//! Basic chain control example.
//!
//! Demonstrates building a stepper chain over mock hardware and running
//! single-motor moves, a coordinated multi-motor move and a homing pass.
//!
//! Run with: `cargo run --example basic_chain --features std`

use shift_stepper::{RevPerMin, StdClock, StepperChainBuilder};

/// Mock delay provider for demonstration.
struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        // In real code, this would use hardware timer
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Mock output pin for demonstration.
struct MockPin {
    state: bool,
}

impl MockPin {
    fn new() -> Self {
        Self { state: false }
    }
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

fn main() {
    println!("=== Basic Chain Control Example ===\n");

    // Create mock hardware
    let data_pin = MockPin::new();
    let clock_pin = MockPin::new();
    let latch_pin = MockPin::new();

    // Build a chain of eight motors from manual configuration
    let mut chain = StepperChainBuilder::new()
        .name("demo_chain")
        .data_pin(data_pin)
        .clock_pin(clock_pin)
        .latch_pin(latch_pin)
        .delay(MockDelay)
        .clock(StdClock::new())
        .motor_count(8)
        .steps_per_revolution(200)
        .bits_per_motor(4)
        .build()
        .expect("Failed to build chain");

    println!("Chain created: {}", chain.name());
    println!("Motors: {}", chain.motor_count());
    println!("Drive mode: {:?}", chain.drive_mode());
    println!(
        "Step interval: {} us ({} r/min default)",
        chain.step_interval().as_micros(),
        60
    );

    // Run fast so the demo finishes quickly
    chain.set_speed_rev_per_min(RevPerMin(3000));

    // Single-motor moves
    println!("\n=== Single Motor ===");
    chain.move_one(0, 12).expect("move failed");
    chain.move_one(1, -8).expect("move failed");
    println!("Positions after moves: {:?}", chain.positions());

    // Coordinated move: every motor steps in lock-step rounds
    println!("\n=== Coordinated Move ===");
    chain
        .move_many(&[5, 5, -5, -5, 10, 0, 0, 2])
        .expect("move failed");
    println!("Positions: {:?}", chain.positions());

    // Home everything
    println!("\n=== Homing ===");
    chain.home().expect("home failed");
    println!("Positions after home: {:?}", chain.positions());

    // Enable/disable are no-ops without a wired enable line
    let supported = chain.enable().expect("pin failure");
    println!("\nEnable line wired: {}", supported);

    println!("\n=== Example Complete ===");
}
