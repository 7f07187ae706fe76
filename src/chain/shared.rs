use core::cell::RefCell;

use bitmaps::{Bits, BitsImpl};
use critical_section::Mutex;
use embedded_hal::digital::OutputPin;

use crate::chain::{
    ChainError, driver::ShiftRegister, helpers::pin_location, pin::ChainPin, transport::Transport,
};

/// When pin writes through a [`SharedChain`] reach the hardware.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Flush and latch after every pin write.
    #[default]
    Immediate,
    /// Only update the image; the caller flushes with [`SharedChain::flush`].
    Deferred,
}

/// A [`ShiftRegister`] that many [`ChainPin`]s can borrow at once.
///
/// Every access runs inside a critical section, which serializes a pin
/// write and the flush that may follow it.
pub struct SharedChain<const N: usize, L, OE, T>
where
    L: OutputPin,
    OE: OutputPin,
    T: Transport,
    BitsImpl<N>: Bits,
{
    driver: Mutex<RefCell<ShiftRegister<N, L, OE, T>>>,
    policy: FlushPolicy,
}

impl<const N: usize, L, OE, T> core::fmt::Debug for SharedChain<N, L, OE, T>
where
    L: OutputPin,
    OE: OutputPin,
    T: Transport,
    BitsImpl<N>: Bits,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedChain")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<const N: usize, L, OE, T> SharedChain<N, L, OE, T>
where
    L: OutputPin,
    OE: OutputPin,
    T: Transport,
    BitsImpl<N>: Bits,
{
    pub fn new(driver: ShiftRegister<N, L, OE, T>, policy: FlushPolicy) -> Self {
        Self {
            driver: Mutex::new(RefCell::new(driver)),
            policy,
        }
    }

    pub fn policy(&self) -> FlushPolicy {
        self.policy
    }

    /// Runs `f` with exclusive access to the driver.
    ///
    /// # Panics
    /// Panics if called again from inside `f`.
    pub fn with_driver<R>(&self, f: impl FnOnce(&mut ShiftRegister<N, L, OE, T>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.driver.borrow_ref_mut(cs)))
    }

    /// Returns a pin handle for output `index`.
    pub fn pin(&self, index: u16) -> Result<ChainPin<'_, N, L, OE, T>, ChainError> {
        pin_location::<N>(index)?;
        Ok(ChainPin::new(self, index))
    }

    /// Writes one output, flushing afterwards under [`FlushPolicy::Immediate`].
    pub fn write_pin(&self, index: u16, value: bool) -> Result<(), ChainError> {
        self.with_driver(|driver| {
            driver.digital_write(index, value)?;
            match self.policy {
                FlushPolicy::Immediate => driver.write_gpio(),
                FlushPolicy::Deferred => Ok(()),
            }
        })
    }

    /// Runs the driver's setup sequence.
    pub fn setup(&self) -> Result<(), ChainError> {
        self.with_driver(|driver| driver.setup())
    }

    /// Pushes and latches the image.
    pub fn flush(&self) -> Result<(), ChainError> {
        self.with_driver(|driver| driver.write_gpio())
    }

    /// Pushes and latches the image if any register changed.
    pub fn flush_if_dirty(&self) -> Result<bool, ChainError> {
        self.with_driver(|driver| driver.write_gpio_if_dirty())
    }

    pub fn into_inner(self) -> ShiftRegister<N, L, OE, T> {
        self.driver.into_inner().into_inner()
    }
}
