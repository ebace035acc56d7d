//! Multi-stepper chain driver.
//!
//! One `StepperChain` owns the serial bus, the per-motor position table and
//! the shared timing gate, and sequences every motor on the chain from a
//! single set of GPIO lines.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::bus::{NoPin, ShiftBus};
use crate::clock::StepClock;
use crate::config::units::{RadPerSec, RevPerMin};
use crate::error::{MotorError, Result};
use crate::motion::{StepGate, StepInterval};

use super::pattern::DriveMode;
use super::position::{PositionTable, MAX_MOTORS};

/// Driver for a chain of steppers behind cascaded shift registers.
///
/// Generic over:
/// - `DATA`/`CLK`/`LATCH`: the serial lines (must implement `OutputPin`)
/// - `DELAY`: delay provider for the clear pulse (must implement `DelayNs`)
/// - `C`: monotonic microsecond clock (must implement [`StepClock`])
/// - `CLEAR`/`EN`: optional register-clear and output-enable lines
///   (default [`NoPin`] when unwired)
///
/// All move operations are blocking: they run the motion to completion,
/// pacing each step frame through the speed gate, before returning.
pub struct StepperChain<DATA, CLK, LATCH, DELAY, C, CLEAR = NoPin, EN = NoPin>
where
    DATA: OutputPin,
    CLK: OutputPin,
    LATCH: OutputPin,
    DELAY: DelayNs,
    C: StepClock,
    CLEAR: OutputPin,
    EN: OutputPin,
{
    /// Serial transport to the register chain.
    bus: ShiftBus<DATA, CLK, LATCH>,

    /// Master-reset line (low-active), if wired.
    clear_pin: Option<CLEAR>,

    /// Output-enable line (low-active), if wired.
    enable_pin: Option<EN>,

    /// Delay provider for the clear pulse.
    delay: DELAY,

    /// Microsecond clock feeding the speed gate.
    clock: C,

    /// Per-motor step counters.
    positions: PositionTable,

    /// Coil pattern table shared by every motor on the chain.
    mode: DriveMode,

    /// Steps per mechanical revolution, for speed conversion.
    steps_per_revolution: u16,

    /// Speed gate state.
    gate: StepGate,

    /// Chain name for logging/debugging.
    name: heapless::String<32>,
}

impl<DATA, CLK, LATCH, DELAY, C, CLEAR, EN> StepperChain<DATA, CLK, LATCH, DELAY, C, CLEAR, EN>
where
    DATA: OutputPin,
    CLK: OutputPin,
    LATCH: OutputPin,
    DELAY: DelayNs,
    C: StepClock,
    CLEAR: OutputPin,
    EN: OutputPin,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        bus: ShiftBus<DATA, CLK, LATCH>,
        clear_pin: Option<CLEAR>,
        enable_pin: Option<EN>,
        delay: DELAY,
        clock: C,
        positions: PositionTable,
        mode: DriveMode,
        steps_per_revolution: u16,
        name: heapless::String<32>,
    ) -> Self {
        let gate = StepGate::new(clock.micros());
        Self {
            bus,
            clear_pin,
            enable_pin,
            delay,
            clock,
            positions,
            mode,
            steps_per_revolution,
            gate,
            name,
        }
    }

    /// Get the chain name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Number of motors currently driven.
    #[inline]
    pub fn motor_count(&self) -> usize {
        self.positions.len()
    }

    /// One motor's net displacement from home, in steps.
    #[inline]
    pub fn position(&self, index: usize) -> Option<i32> {
        self.positions.get(index)
    }

    /// All motor positions, index = motor identifier.
    #[inline]
    pub fn positions(&self) -> &[i32] {
        self.positions.as_slice()
    }

    /// The drive sequence in use.
    #[inline]
    pub fn drive_mode(&self) -> DriveMode {
        self.mode
    }

    /// The enforced pause between step frames.
    #[inline]
    pub fn step_interval(&self) -> StepInterval {
        self.gate.interval()
    }

    /// Set the step rate from revolutions per minute.
    ///
    /// A zero speed is ignored; the previous rate stays in effect.
    pub fn set_speed_rev_per_min(&mut self, speed: RevPerMin) {
        if let Some(interval) = StepInterval::from_rev_per_min(self.steps_per_revolution, speed) {
            self.gate.set_interval(interval);
        }
    }

    /// Set the step rate from radians per second.
    ///
    /// Shares `steps_per_revolution` with the r/min conversion, so the two
    /// unit systems must not be mixed across motors on one chain. A
    /// non-positive speed is ignored.
    pub fn set_speed_rad_per_sec(&mut self, speed: RadPerSec) {
        if let Some(interval) = StepInterval::from_rad_per_sec(self.steps_per_revolution, speed) {
            self.gate.set_interval(interval);
        }
    }

    /// Pull the output-enable line low, powering the parallel outputs.
    ///
    /// Returns `Ok(false)` when no enable line is wired (no-op).
    pub fn enable(&mut self) -> Result<bool> {
        match self.enable_pin.as_mut() {
            Some(pin) => {
                pin.set_low().map_err(|_| MotorError::PinError)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Pull the output-enable line high, tristating the parallel outputs.
    ///
    /// Returns `Ok(false)` when no enable line is wired (no-op).
    pub fn disable(&mut self) -> Result<bool> {
        match self.enable_pin.as_mut() {
            Some(pin) => {
                pin.set_high().map_err(|_| MotorError::PinError)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Pulse the register master-reset low for 10 ms, zeroing the shift
    /// stages of every register in the chain.
    ///
    /// Returns `Ok(false)` when no clear line is wired (no-op).
    pub fn clear(&mut self) -> Result<bool> {
        match self.clear_pin.as_mut() {
            Some(pin) => {
                pin.set_low().map_err(|_| MotorError::PinError)?;
                self.delay.delay_ms(10);
                pin.set_high().map_err(|_| MotorError::PinError)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move a single motor by `steps` (sign = direction), one step frame at
    /// a time.
    ///
    /// An out-of-range index is silently ignored. Every step retransmits
    /// the whole chain, so other motors hold their current phase.
    pub fn move_one(&mut self, index: usize, steps: i32) -> Result<()> {
        if index >= self.positions.len() {
            return Ok(());
        }

        let mut remaining = steps;
        while remaining != 0 {
            if remaining > 0 {
                remaining -= 1;
                self.positions.advance(index, 1);
            } else {
                remaining += 1;
                self.positions.advance(index, -1);
            }
            self.broadcast(0)?;
        }
        Ok(())
    }

    /// Move several motors in lock-step, one delta entry per motor index.
    ///
    /// Lists longer than the motor count are silently truncated. Each
    /// round consumes one step of every nonzero delta and produces exactly
    /// one broadcast, truncated to the highest index that moved; rounds
    /// repeat until every delta is exhausted, so the number of rounds is
    /// the largest delta magnitude.
    pub fn move_many(&mut self, deltas: &[i32]) -> Result<()> {
        let len = deltas.len().min(self.positions.len());
        let mut remaining: heapless::Vec<i32, MAX_MOTORS> = heapless::Vec::new();
        let _ = remaining.extend_from_slice(&deltas[..len]);

        loop {
            let mut settled = 0;
            let mut max_changed = 0;
            for (index, delta) in remaining.iter_mut().enumerate() {
                if *delta > 0 {
                    *delta -= 1;
                    self.positions.advance(index, 1);
                    max_changed = index;
                } else if *delta < 0 {
                    *delta += 1;
                    self.positions.advance(index, -1);
                    max_changed = index;
                } else {
                    settled += 1;
                }
            }

            if settled == len {
                return Ok(());
            }
            self.broadcast(max_changed)?;
        }
    }

    /// Drive every motor back to its zero position.
    ///
    /// Same lock-step rounds as [`move_many`](Self::move_many): one step
    /// toward zero per motor per round, one broadcast per round, until all
    /// counters read zero.
    pub fn home(&mut self) -> Result<()> {
        let count = self.positions.len();

        loop {
            let mut settled = 0;
            let mut max_changed = 0;
            for index in 0..count {
                if self.positions.step_toward_zero(index) {
                    max_changed = index;
                } else {
                    settled += 1;
                }
            }

            if settled == count {
                return Ok(());
            }
            self.broadcast(max_changed)?;
        }
    }

    /// Replace the position table with `count` zeroed counters.
    ///
    /// All displacement history is discarded. On failure the previous
    /// table and motor count are left exactly as they were.
    pub fn resize_motors(&mut self, count: usize) -> Result<()> {
        self.positions.resize(count)?;
        Ok(())
    }

    /// Shift out one step frame for motors `0..=changed` and latch it.
    ///
    /// `changed` is a transmission-length hint: motors above it keep their
    /// latched outputs, which saves wire time when only low-indexed motors
    /// moved. `0` and any value at or past the motor count mean "the whole
    /// chain". Frames go out far-end first so that after `changed + 1`
    /// shifts, motor 0's pattern sits in the register nearest the MCU.
    fn broadcast(&mut self, changed: usize) -> Result<()> {
        let count = self.positions.len();
        if count == 0 {
            return Ok(());
        }

        self.gate.wait(&self.clock);

        let last = if changed == 0 || changed >= count {
            count - 1
        } else {
            changed
        };

        self.bus.open()?;
        for offset in 0..=last {
            let counter = self.positions.get(last - offset).unwrap_or(0);
            self.bus.shift_out(self.mode.pattern_for(counter))?;
        }
        self.bus.commit()?;

        Ok(())
    }
}
