use embedded_hal::spi::SpiBus;

use crate::chain::{ChainError, transport::Transport};

/// Transport that hands the whole frame to a synchronous serial bus.
///
/// The bus owns clock and data signaling. Configure it for SPI mode 0 and
/// most-significant bit first; wiring differences are handled by
/// [`ShiftOrder`](crate::chain::ShiftOrder), not by the bus.
pub struct SpiTransport<BUS> {
    bus: BUS,
}

impl<BUS> core::fmt::Debug for SpiTransport<BUS> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpiTransport").finish_non_exhaustive()
    }
}

impl<BUS: SpiBus<u8>> SpiTransport<BUS> {
    pub fn new(bus: BUS) -> Self {
        Self { bus }
    }

    /// Returns the bus.
    pub fn release(self) -> BUS {
        self.bus
    }
}

impl<BUS: SpiBus<u8>> Transport for SpiTransport<BUS> {
    fn transfer(&mut self, frame: &[u8]) -> Result<(), ChainError> {
        self.bus.write(frame).map_err(ChainError::bus)?;
        // The latch must not pulse before the last bit has left the bus.
        self.bus.flush().map_err(ChainError::bus)
    }
}
