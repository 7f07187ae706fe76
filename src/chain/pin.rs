use core::convert::Infallible;

use bitmaps::{Bits, BitsImpl};
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::chain::{ChainError, shared::SharedChain, transport::Transport};

/// One output of a shift-register chain, usable as an ordinary output pin.
///
/// Holds only a borrow of its [`SharedChain`] and a bit index; the level
/// lives in the chain's image. Writes go through
/// [`SharedChain::write_pin`], so whether they reach the hardware at once
/// depends on the chain's [`FlushPolicy`](crate::chain::FlushPolicy).
///
/// Created by [`SharedChain::pin`], which checks the index once.
pub struct ChainPin<'a, const N: usize, L, OE, T>
where
    L: OutputPin,
    OE: OutputPin,
    T: Transport,
    BitsImpl<N>: Bits,
{
    chain: &'a SharedChain<N, L, OE, T>,
    index: u16,
    inverted: bool,
}

impl<'a, const N: usize, L, OE, T> core::fmt::Debug for ChainPin<'a, N, L, OE, T>
where
    L: OutputPin,
    OE: OutputPin,
    T: Transport,
    BitsImpl<N>: Bits,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChainPin")
            .field("index", &self.index)
            .field("inverted", &self.inverted)
            .finish_non_exhaustive()
    }
}

impl<'a, const N: usize, L, OE, T> ChainPin<'a, N, L, OE, T>
where
    L: OutputPin,
    OE: OutputPin,
    T: Transport,
    BitsImpl<N>: Bits,
{
    pub(crate) fn new(chain: &'a SharedChain<N, L, OE, T>, index: u16) -> Self {
        Self {
            chain,
            index,
            inverted: false,
        }
    }

    /// Makes a logical high drive the physical output low.
    pub fn inverted(mut self) -> Self {
        self.inverted = !self.inverted;
        self
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    /// Drives the pin to the logical level `value`.
    pub fn write(&mut self, value: bool) -> Result<(), ChainError> {
        self.chain.write_pin(self.index, value != self.inverted)
    }
}

impl<'a, const N: usize, L, OE, T> ErrorType for ChainPin<'a, N, L, OE, T>
where
    L: OutputPin,
    OE: OutputPin,
    T: Transport,
    BitsImpl<N>: Bits,
{
    type Error = ChainError;
}

impl<'a, const N: usize, L, OE, T> OutputPin for ChainPin<'a, N, L, OE, T>
where
    L: OutputPin,
    OE: OutputPin,
    T: Transport,
    BitsImpl<N>: Bits,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

/// Placeholder for a pin that is not wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
