use core::marker::PhantomData;

use bitmaps::{Bits, BitsImpl};
use embedded_hal::{digital::OutputPin, spi::SpiBus};

use crate::chain::{
    driver::ShiftRegister,
    order::ShiftOrder,
    pin::NoPin,
    transport::{BitBangTransport, NoTransport, SpiTransport, Transport},
};

// Builder states
pub struct NeedRegisters;
pub struct NeedLatch;
pub struct NeedOutputEnable;
pub struct NeedTransport;
pub struct Ready;

/// Step-by-step configuration of a [`ShiftRegister`].
///
/// Each step is required in order, so a chain without a register count or
/// latch pin does not compile:
///
/// ```
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::{ErrorType, OutputPin};
/// # struct Gpio;
/// # impl ErrorType for Gpio { type Error = Infallible; }
/// # impl OutputPin for Gpio {
/// #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
/// # }
/// use embedded_hc595::chain::{ChainBuilder, ShiftOrder};
///
/// let driver = ChainBuilder::new()
///     .registers::<4>()
///     .latch(Gpio)
///     .no_output_enable()
///     .bit_bang(Gpio, Gpio)
///     .shift_order(ShiftOrder::FORWARD_LSB_FIRST)
///     .build();
///
/// assert_eq!(driver.pin_count(), 32);
/// ```
pub struct ChainBuilder<const N: usize, L, OE, T, State> {
    latch: L,
    output_enable: OE,
    transport: T,
    order: ShiftOrder,
    _phantom: PhantomData<State>,
}

// Start the builder
impl ChainBuilder<0, (), (), (), NeedRegisters> {
    pub fn new() -> Self {
        ChainBuilder {
            latch: (),
            output_enable: (),
            transport: (),
            order: ShiftOrder::default(),
            _phantom: PhantomData,
        }
    }
}

impl Default for ChainBuilder<0, (), (), (), NeedRegisters> {
    fn default() -> Self {
        Self::new()
    }
}

// Set register count
impl ChainBuilder<0, (), (), (), NeedRegisters> {
    /// Set the number of chained registers.
    ///
    /// # Panics
    /// Panics if `N` is 0; a chain needs at least one register.
    pub fn registers<const N: usize>(self) -> ChainBuilder<N, (), (), (), NeedLatch> {
        assert!(N > 0, "a shift chain needs at least one register");

        ChainBuilder {
            latch: (),
            output_enable: (),
            transport: (),
            order: self.order,
            _phantom: PhantomData,
        }
    }
}

// Set latch pin
impl<const N: usize> ChainBuilder<N, (), (), (), NeedLatch> {
    pub fn latch<L: OutputPin>(self, latch: L) -> ChainBuilder<N, L, (), (), NeedOutputEnable> {
        ChainBuilder {
            latch,
            output_enable: (),
            transport: (),
            order: self.order,
            _phantom: PhantomData,
        }
    }
}

// Set output-enable pin
impl<const N: usize, L: OutputPin> ChainBuilder<N, L, (), (), NeedOutputEnable> {
    pub fn output_enable<OE: OutputPin>(
        self,
        pin: OE,
    ) -> ChainBuilder<N, L, Option<OE>, (), NeedTransport> {
        ChainBuilder {
            latch: self.latch,
            output_enable: Some(pin),
            transport: (),
            order: self.order,
            _phantom: PhantomData,
        }
    }

    /// The `OE` line is tied low in hardware.
    pub fn no_output_enable(self) -> ChainBuilder<N, L, Option<NoPin>, (), NeedTransport> {
        ChainBuilder {
            latch: self.latch,
            output_enable: None,
            transport: (),
            order: self.order,
            _phantom: PhantomData,
        }
    }
}

// Set transport
impl<const N: usize, L: OutputPin, OE: OutputPin>
    ChainBuilder<N, L, Option<OE>, (), NeedTransport>
{
    /// Shift through dedicated clock (`SRCLK`) and data (`SER`) pins.
    pub fn bit_bang<CLK: OutputPin, DATA: OutputPin>(
        self,
        clock: CLK,
        data: DATA,
    ) -> ChainBuilder<N, L, Option<OE>, BitBangTransport<CLK, DATA>, Ready> {
        self.transport(BitBangTransport::new(clock, data))
    }

    /// Shift through an SPI bus wired to `SER` and `SRCLK`.
    pub fn spi<BUS: SpiBus<u8>>(
        self,
        bus: BUS,
    ) -> ChainBuilder<N, L, Option<OE>, SpiTransport<BUS>, Ready> {
        self.transport(SpiTransport::new(bus))
    }

    /// Keep the image and latch without shifting anything.
    pub fn no_transport(self) -> ChainBuilder<N, L, Option<OE>, NoTransport, Ready> {
        self.transport(NoTransport)
    }

    fn transport<T: Transport>(self, transport: T) -> ChainBuilder<N, L, Option<OE>, T, Ready> {
        ChainBuilder {
            latch: self.latch,
            output_enable: self.output_enable,
            transport,
            order: self.order,
            _phantom: PhantomData,
        }
    }
}

// Finish
impl<const N: usize, L, OE, T> ChainBuilder<N, L, Option<OE>, T, Ready>
where
    L: OutputPin,
    OE: OutputPin,
    T: Transport,
    BitsImpl<N>: Bits,
{
    /// Override the default [`ShiftOrder::NEAREST_MSB_FIRST`] wiring.
    pub fn shift_order(mut self, order: ShiftOrder) -> Self {
        self.order = order;
        self
    }

    pub fn build(self) -> ShiftRegister<N, L, OE, T> {
        ShiftRegister::new(self.latch, self.output_enable, self.transport, self.order)
    }
}
