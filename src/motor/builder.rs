//! Builder pattern for StepperChain.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::bus::{NoPin, ShiftBus};
use crate::clock::StepClock;
use crate::config::units::RevPerMin;
use crate::config::SystemConfig;
use crate::error::{ConfigError, Error, MotorError, Result};
use crate::motor::pattern::DriveMode;
use crate::motor::position::PositionTable;

use super::driver::StepperChain;

/// Builder for creating StepperChain instances.
///
/// The clear and enable lines default to [`NoPin`]; wiring one swaps the
/// builder to the supplied pin type.
pub struct StepperChainBuilder<DATA, CLK, LATCH, DELAY, C, CLEAR = NoPin, EN = NoPin>
where
    DATA: OutputPin,
    CLK: OutputPin,
    LATCH: OutputPin,
    DELAY: DelayNs,
    C: StepClock,
    CLEAR: OutputPin,
    EN: OutputPin,
{
    data_pin: Option<DATA>,
    clock_pin: Option<CLK>,
    latch_pin: Option<LATCH>,
    clear_pin: Option<CLEAR>,
    enable_pin: Option<EN>,
    delay: Option<DELAY>,
    clock: Option<C>,
    name: Option<heapless::String<32>>,
    motor_count: Option<u16>,
    steps_per_revolution: Option<u16>,
    drive_mode: DriveMode,
    bits_per_motor: u8,
    speed: RevPerMin,
}

impl<DATA, CLK, LATCH, DELAY, C> StepperChainBuilder<DATA, CLK, LATCH, DELAY, C>
where
    DATA: OutputPin,
    CLK: OutputPin,
    LATCH: OutputPin,
    DELAY: DelayNs,
    C: StepClock,
{
    /// Create a new builder with no optional lines wired.
    pub fn new() -> Self {
        Self {
            data_pin: None,
            clock_pin: None,
            latch_pin: None,
            clear_pin: None,
            enable_pin: None,
            delay: None,
            clock: None,
            name: None,
            motor_count: None,
            steps_per_revolution: None,
            drive_mode: DriveMode::default(),
            bits_per_motor: 4,
            speed: RevPerMin::default(),
        }
    }
}

impl<DATA, CLK, LATCH, DELAY, C> Default for StepperChainBuilder<DATA, CLK, LATCH, DELAY, C>
where
    DATA: OutputPin,
    CLK: OutputPin,
    LATCH: OutputPin,
    DELAY: DelayNs,
    C: StepClock,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<DATA, CLK, LATCH, DELAY, C, CLEAR, EN> StepperChainBuilder<DATA, CLK, LATCH, DELAY, C, CLEAR, EN>
where
    DATA: OutputPin,
    CLK: OutputPin,
    LATCH: OutputPin,
    DELAY: DelayNs,
    C: StepClock,
    CLEAR: OutputPin,
    EN: OutputPin,
{
    /// Set the serial data pin.
    pub fn data_pin(mut self, pin: DATA) -> Self {
        self.data_pin = Some(pin);
        self
    }

    /// Set the shift clock pin.
    pub fn clock_pin(mut self, pin: CLK) -> Self {
        self.clock_pin = Some(pin);
        self
    }

    /// Set the storage latch pin.
    pub fn latch_pin(mut self, pin: LATCH) -> Self {
        self.latch_pin = Some(pin);
        self
    }

    /// Wire the register master-reset line.
    pub fn clear_pin<P>(
        self,
        pin: P,
    ) -> StepperChainBuilder<DATA, CLK, LATCH, DELAY, C, P, EN>
    where
        P: OutputPin,
    {
        StepperChainBuilder {
            data_pin: self.data_pin,
            clock_pin: self.clock_pin,
            latch_pin: self.latch_pin,
            clear_pin: Some(pin),
            enable_pin: self.enable_pin,
            delay: self.delay,
            clock: self.clock,
            name: self.name,
            motor_count: self.motor_count,
            steps_per_revolution: self.steps_per_revolution,
            drive_mode: self.drive_mode,
            bits_per_motor: self.bits_per_motor,
            speed: self.speed,
        }
    }

    /// Wire the output-enable line.
    pub fn enable_pin<P>(
        self,
        pin: P,
    ) -> StepperChainBuilder<DATA, CLK, LATCH, DELAY, C, CLEAR, P>
    where
        P: OutputPin,
    {
        StepperChainBuilder {
            data_pin: self.data_pin,
            clock_pin: self.clock_pin,
            latch_pin: self.latch_pin,
            clear_pin: self.clear_pin,
            enable_pin: Some(pin),
            delay: self.delay,
            clock: self.clock,
            name: self.name,
            motor_count: self.motor_count,
            steps_per_revolution: self.steps_per_revolution,
            drive_mode: self.drive_mode,
            bits_per_motor: self.bits_per_motor,
            speed: self.speed,
        }
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the microsecond clock source.
    pub fn clock(mut self, clock: C) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the chain name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set the number of motors on the chain.
    pub fn motor_count(mut self, count: u16) -> Self {
        self.motor_count = Some(count);
        self
    }

    /// Set steps per mechanical revolution (for speed conversion).
    pub fn steps_per_revolution(mut self, steps: u16) -> Self {
        self.steps_per_revolution = Some(steps);
        self
    }

    /// Set the coil drive sequence.
    pub fn drive_mode(mut self, mode: DriveMode) -> Self {
        self.drive_mode = mode;
        self
    }

    /// Set how many pattern bits are wired out per motor (1-8).
    pub fn bits_per_motor(mut self, bits: u8) -> Self {
        self.bits_per_motor = bits;
        self
    }

    /// Set the initial step rate in revolutions per minute.
    pub fn speed_rev_per_min(mut self, speed: RevPerMin) -> Self {
        self.speed = speed;
        self
    }

    /// Configure chain geometry and motor bank from a SystemConfig.
    pub fn from_config(mut self, config: &SystemConfig) -> Self {
        if !config.chain.name.is_empty() {
            self.name = Some(config.chain.name.clone());
        }
        self.bits_per_motor = config.chain.bits_per_motor;
        self.motor_count = Some(config.motors.count);
        self.steps_per_revolution = Some(config.motors.steps_per_revolution);
        self.drive_mode = config.motors.drive_mode;
        self.speed = config.motors.speed;
        self
    }

    /// Build the StepperChain.
    ///
    /// Settles the control lines to their idle levels (latch low, clear
    /// high, enable low) and applies the configured speed.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing, the bits-per-motor
    /// value is outside 1-8, or the motor count exceeds the table capacity.
    pub fn build(self) -> Result<StepperChain<DATA, CLK, LATCH, DELAY, C, CLEAR, EN>> {
        let data_pin = self.data_pin.ok_or_else(|| {
            Error::Config(ConfigError::ParseError(
                heapless::String::try_from("data_pin is required").unwrap(),
            ))
        })?;

        let clock_pin = self.clock_pin.ok_or_else(|| {
            Error::Config(ConfigError::ParseError(
                heapless::String::try_from("clock_pin is required").unwrap(),
            ))
        })?;

        let latch_pin = self.latch_pin.ok_or_else(|| {
            Error::Config(ConfigError::ParseError(
                heapless::String::try_from("latch_pin is required").unwrap(),
            ))
        })?;

        let delay = self.delay.ok_or_else(|| {
            Error::Config(ConfigError::ParseError(
                heapless::String::try_from("delay is required").unwrap(),
            ))
        })?;

        let clock = self.clock.ok_or_else(|| {
            Error::Config(ConfigError::ParseError(
                heapless::String::try_from("clock is required").unwrap(),
            ))
        })?;

        let motor_count = self.motor_count.ok_or_else(|| {
            Error::Config(ConfigError::ParseError(
                heapless::String::try_from("motor_count is required").unwrap(),
            ))
        })?;

        let steps_per_revolution = self.steps_per_revolution.ok_or_else(|| {
            Error::Config(ConfigError::ParseError(
                heapless::String::try_from("steps_per_revolution is required").unwrap(),
            ))
        })?;

        if !(1..=8).contains(&self.bits_per_motor) {
            return Err(Error::Config(ConfigError::InvalidBitsPerMotor(
                self.bits_per_motor,
            )));
        }

        if steps_per_revolution == 0 {
            return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)));
        }

        let positions = PositionTable::new(motor_count as usize)?;

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("chain").unwrap());

        // Settle every line to its idle level before the first frame.
        let mut bus = ShiftBus::new(data_pin, clock_pin, latch_pin, self.bits_per_motor);
        bus.open()?;

        let mut clear_pin = self.clear_pin;
        if let Some(pin) = clear_pin.as_mut() {
            pin.set_high().map_err(|_| MotorError::PinError)?;
        }

        let mut enable_pin = self.enable_pin;
        if let Some(pin) = enable_pin.as_mut() {
            pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        let mut chain = StepperChain::new(
            bus,
            clear_pin,
            enable_pin,
            delay,
            clock,
            positions,
            self.drive_mode,
            steps_per_revolution,
            name,
        );
        chain.set_speed_rev_per_min(self.speed);

        Ok(chain)
    }
}
