use bitmaps::{Bits, BitsImpl};
use embedded_hal::digital::{OutputPin, PinState};

use crate::chain::{
    ChainError, OUTPUT_DISABLED, OUTPUT_ENABLED,
    image::OutputImage,
    order::ShiftOrder,
    transport::Transport,
};

/// Driver for a chain of `N` daisy-chained 74HC595 registers.
///
/// Owns the output image, the latch pin (`RCLK`), an optional
/// output-enable pin (`OE`) and the transport that shifts bits in.
/// Pin writes only touch the image; [`write_gpio`](Self::write_gpio)
/// pushes it to the hardware.
///
/// # Const Generics
/// - `N`: Number of registers in the chain
///
/// # Type Parameters
/// - `L`: Latch pin
/// - `OE`: Output-enable pin ([`NoPin`](crate::chain::NoPin) when not wired)
/// - `T`: Transport shifting the frame into the chain
///
/// The driver has no internal locking. Share it through
/// [`SharedChain`](crate::chain::SharedChain) when several contexts write pins.
pub struct ShiftRegister<const N: usize, L, OE, T>
where
    L: OutputPin,
    OE: OutputPin,
    T: Transport,
    BitsImpl<N>: Bits,
{
    image: OutputImage<N>,
    latch: L,
    output_enable: Option<OE>,
    transport: T,
    order: ShiftOrder,
}

impl<const N: usize, L, OE, T> core::fmt::Debug for ShiftRegister<N, L, OE, T>
where
    L: OutputPin,
    OE: OutputPin,
    T: Transport,
    BitsImpl<N>: Bits,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShiftRegister")
            .field("registers", &N)
            .field("image", &self.image)
            .field("output_enable", &self.output_enable.is_some())
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

impl<const N: usize, L, OE, T> ShiftRegister<N, L, OE, T>
where
    L: OutputPin,
    OE: OutputPin,
    T: Transport,
    BitsImpl<N>: Bits,
{
    pub fn new(latch: L, output_enable: Option<OE>, transport: T, order: ShiftOrder) -> Self {
        Self {
            image: OutputImage::new(),
            latch,
            output_enable,
            transport,
            order,
        }
    }

    /// Disables the outputs before anything is shifted.
    ///
    /// Register contents are undefined at power-on; keeping `OE` high until
    /// the first latch hides them. Does nothing without an output-enable pin.
    pub fn pre_setup(&mut self) -> Result<(), ChainError> {
        if let Some(pin) = self.output_enable.as_mut() {
            pin.set_state(OUTPUT_DISABLED).map_err(ChainError::pin)?;
        }
        Ok(())
    }

    /// Drives the latch to its idle low level.
    pub fn post_setup(&mut self) -> Result<(), ChainError> {
        self.latch.set_low().map_err(ChainError::pin)
    }

    /// Runs the full setup sequence: disable outputs, idle the transport
    /// lines, idle the latch.
    ///
    /// Outputs stay disabled; flush the initial image and call
    /// [`enable_outputs`](Self::enable_outputs) once it is latched.
    pub fn setup(&mut self) -> Result<(), ChainError> {
        log::debug!("setting up {}-register shift chain", N);
        self.pre_setup()?;
        self.transport.setup()?;
        self.post_setup()
    }

    /// Sets or clears one output in the image.
    ///
    /// Nothing is sent to the chain until the next flush. An index outside
    /// `0..8 * N` is logged and rejected without touching the image.
    pub fn digital_write(&mut self, index: u16, value: bool) -> Result<(), ChainError> {
        self.image.set(index, value).inspect_err(|_| {
            log::error!(
                "pin {} is out of range, {} chained registers expose pins 0..{}",
                index,
                N,
                self.image.pin_count()
            );
        })
    }

    /// Replaces the byte of one register in the image.
    pub fn write_register(&mut self, register: usize, byte: u8) -> Result<(), ChainError> {
        self.image.set_register(register, byte)
    }

    /// Pushes the image through the transport and latches it.
    ///
    /// The latch is pulsed high then low with no transport traffic in
    /// between. The output-enable pin is left alone.
    pub fn write_gpio(&mut self) -> Result<(), ChainError> {
        let frame = self.image.frame(&self.order);
        log::trace!("shifting {:02x?}", frame);
        self.transport.transfer(&frame)?;
        self.latch.set_high().map_err(ChainError::pin)?;
        self.latch.set_low().map_err(ChainError::pin)?;
        self.image.clear_dirty();
        Ok(())
    }

    /// Flushes only when a register changed since the last flush.
    ///
    /// Returns whether a flush happened.
    pub fn write_gpio_if_dirty(&mut self) -> Result<bool, ChainError> {
        if !self.image.any_dirty() {
            return Ok(false);
        }
        self.write_gpio()?;
        Ok(true)
    }

    /// Drives `OE` low so latched values reach the outputs.
    pub fn enable_outputs(&mut self) -> Result<(), ChainError> {
        self.drive_output_enable(OUTPUT_ENABLED)
    }

    /// Drives `OE` high, suppressing every output.
    pub fn disable_outputs(&mut self) -> Result<(), ChainError> {
        self.drive_output_enable(OUTPUT_DISABLED)
    }

    pub fn image(&self) -> &OutputImage<N> {
        &self.image
    }

    pub fn shift_order(&self) -> ShiftOrder {
        self.order
    }

    pub fn has_output_enable(&self) -> bool {
        self.output_enable.is_some()
    }

    /// Number of addressable pins.
    pub const fn pin_count(&self) -> usize {
        self.image.pin_count()
    }

    /// Returns the latch pin, output-enable pin and transport.
    pub fn release(self) -> (L, Option<OE>, T) {
        (self.latch, self.output_enable, self.transport)
    }

    fn drive_output_enable(&mut self, level: PinState) -> Result<(), ChainError> {
        let Some(pin) = self.output_enable.as_mut() else {
            return Ok(());
        };
        log::debug!("output enable -> {:?}", level);
        pin.set_state(level).map_err(ChainError::pin)
    }
}
