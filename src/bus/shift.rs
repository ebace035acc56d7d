//! Two-wire serial output to cascaded shift registers.
//!
//! Data is clocked in LSB first, one bit per rising edge of the shift
//! clock; a separate storage-latch pulse moves the shifted bits to the
//! parallel outputs of every register in the chain at once.

use embedded_hal::digital::OutputPin;

use crate::error::{MotorError, Result};

/// Placeholder type for an unwired optional line.
///
/// Writes are discarded. Used as the clear/enable pin type when those
/// lines are not connected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl embedded_hal::digital::ErrorType for NoPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoPin {
    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

/// The serial side of the register chain: data, shift clock, storage latch.
///
/// Generic over embedded-hal 1.0 `OutputPin` types. `bits_per_frame` is how
/// many of a pattern byte's low bits are actually wired to a motor's driver
/// lines; only those are shifted out.
pub struct ShiftBus<DATA, CLK, LATCH>
where
    DATA: OutputPin,
    CLK: OutputPin,
    LATCH: OutputPin,
{
    data: DATA,
    clock: CLK,
    latch: LATCH,
    bits_per_frame: u8,
}

impl<DATA, CLK, LATCH> ShiftBus<DATA, CLK, LATCH>
where
    DATA: OutputPin,
    CLK: OutputPin,
    LATCH: OutputPin,
{
    /// Create a bus over the three serial lines.
    pub fn new(data: DATA, clock: CLK, latch: LATCH, bits_per_frame: u8) -> Self {
        Self {
            data,
            clock,
            latch,
            bits_per_frame,
        }
    }

    /// Bits shifted per motor frame.
    #[inline]
    pub fn bits_per_frame(&self) -> u8 {
        self.bits_per_frame
    }

    /// Shift out the low `bits_per_frame` bits of `value`, bit 0 first.
    ///
    /// Per bit: clock low, data set to the bit, clock high. The downstream
    /// register samples on the rising edge, so the call returns with the
    /// clock high and the data line holding the last bit.
    pub fn shift_out(&mut self, value: u8) -> Result<()> {
        for bit in 0..self.bits_per_frame {
            self.clock.set_low().map_err(|_| MotorError::PinError)?;

            if value & (1 << bit) != 0 {
                self.data.set_high().map_err(|_| MotorError::PinError)?;
            } else {
                self.data.set_low().map_err(|_| MotorError::PinError)?;
            }

            self.clock.set_high().map_err(|_| MotorError::PinError)?;
        }
        Ok(())
    }

    /// Drop the storage latch, opening the write window.
    pub fn open(&mut self) -> Result<()> {
        self.latch.set_low().map_err(|_| MotorError::PinError)?;
        Ok(())
    }

    /// Pulse the storage latch high then low.
    ///
    /// The rising edge commits every register's shifted bits to its
    /// parallel outputs simultaneously; the falling edge returns the latch
    /// to the write-ready idle level.
    pub fn commit(&mut self) -> Result<()> {
        self.latch.set_high().map_err(|_| MotorError::PinError)?;
        self.latch.set_low().map_err(|_| MotorError::PinError)?;
        Ok(())
    }
}
