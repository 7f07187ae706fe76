use embedded_hal::digital::{OutputPin, PinState};

use crate::chain::{BITS_PER_REGISTER, ChainError, transport::Transport};

/// Transport that toggles the serial clock and data lines directly.
///
/// Each bit sets `SER`, then pulses `SRCLK` high and low. After a transfer
/// both lines rest low.
pub struct BitBangTransport<CLK, DATA> {
    clock: CLK,
    data: DATA,
}

impl<CLK, DATA> core::fmt::Debug for BitBangTransport<CLK, DATA> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BitBangTransport").finish_non_exhaustive()
    }
}

impl<CLK, DATA> BitBangTransport<CLK, DATA>
where
    CLK: OutputPin,
    DATA: OutputPin,
{
    pub fn new(clock: CLK, data: DATA) -> Self {
        Self { clock, data }
    }

    /// Returns the clock and data pins.
    pub fn release(self) -> (CLK, DATA) {
        (self.clock, self.data)
    }

    fn shift_byte(&mut self, byte: u8) -> Result<(), ChainError> {
        for bit in (0..BITS_PER_REGISTER).rev() {
            let level = PinState::from(byte & (1 << bit) != 0);
            self.data.set_state(level).map_err(ChainError::pin)?;
            self.clock.set_high().map_err(ChainError::pin)?;
            self.clock.set_low().map_err(ChainError::pin)?;
        }
        Ok(())
    }
}

impl<CLK, DATA> Transport for BitBangTransport<CLK, DATA>
where
    CLK: OutputPin,
    DATA: OutputPin,
{
    fn setup(&mut self) -> Result<(), ChainError> {
        self.clock.set_low().map_err(ChainError::pin)?;
        self.data.set_low().map_err(ChainError::pin)
    }

    fn transfer(&mut self, frame: &[u8]) -> Result<(), ChainError> {
        for &byte in frame {
            self.shift_byte(byte)?;
        }
        // Clock already rests low; bring data down to match.
        self.data.set_low().map_err(ChainError::pin)
    }
}
