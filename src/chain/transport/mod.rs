mod base;
mod bitbang;
mod spi;

pub use base::NoTransport;
pub use bitbang::BitBangTransport;
pub use spi::SpiTransport;

use crate::chain::ChainError;

/// Pushes a wire frame into the register chain.
///
/// A transport only shifts bits. Latching them to the outputs is done by
/// [`ShiftRegister`](crate::chain::ShiftRegister) once `transfer` returns,
/// so every transport shares the same latch protocol.
pub trait Transport {
    /// Drives any lines the transport owns to their idle level.
    fn setup(&mut self) -> Result<(), ChainError> {
        Ok(())
    }

    /// Shifts `frame` into the chain.
    ///
    /// Byte 0 goes first and each byte is sent most-significant bit first.
    /// All bits must be in the chain when this returns.
    fn transfer(&mut self, frame: &[u8]) -> Result<(), ChainError>;
}
