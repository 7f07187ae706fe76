use bitmaps::{Bitmap, Bits, BitsImpl};

use crate::chain::{
    error::ChainError,
    helpers::{bit_mask, pin_count, pin_location},
    order::ShiftOrder,
};

/// Bit-packed desired state of every output in an `N`-register chain.
///
/// Byte `r` holds the outputs of register `r`; bit 0 is the register's
/// first output. A register is dirty once a write changes its byte and
/// stays dirty until [`clear_dirty`](Self::clear_dirty).
pub struct OutputImage<const N: usize>
where
    BitsImpl<N>: Bits,
{
    bytes: [u8; N],
    dirty: Bitmap<N>,
}

impl<const N: usize> core::fmt::Debug for OutputImage<N>
where
    BitsImpl<N>: Bits,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OutputImage")
            .field("bytes", &self.bytes)
            .field("dirty", &self.any_dirty())
            .finish()
    }
}

impl<const N: usize> Default for OutputImage<N>
where
    BitsImpl<N>: Bits,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> OutputImage<N>
where
    BitsImpl<N>: Bits,
{
    /// Creates a zero-filled, clean image.
    pub fn new() -> Self {
        Self {
            bytes: [0; N],
            dirty: Bitmap::new(),
        }
    }

    /// Number of registers in the chain.
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Number of addressable pins.
    pub const fn pin_count(&self) -> usize {
        pin_count::<N>()
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Returns the desired level of pin `index`.
    pub fn get(&self, index: u16) -> Result<bool, ChainError> {
        let (register, bit) = pin_location::<N>(index)?;
        Ok(self.bytes[register] & bit_mask(bit) != 0)
    }

    /// Sets or clears pin `index`, leaving the image untouched on error.
    pub fn set(&mut self, index: u16, value: bool) -> Result<(), ChainError> {
        let (register, bit) = pin_location::<N>(index)?;
        let byte = if value {
            self.bytes[register] | bit_mask(bit)
        } else {
            self.bytes[register] & !bit_mask(bit)
        };
        self.store(register, byte);
        Ok(())
    }

    /// Returns the byte of register `register`.
    pub fn register(&self, register: usize) -> Result<u8, ChainError> {
        self.bytes
            .get(register)
            .copied()
            .ok_or(ChainError::RegisterOutOfRange)
    }

    /// Replaces the byte of register `register`.
    pub fn set_register(&mut self, register: usize, byte: u8) -> Result<(), ChainError> {
        if register >= N {
            return Err(ChainError::RegisterOutOfRange);
        }
        self.store(register, byte);
        Ok(())
    }

    /// Returns true if register `register` changed since the last clear.
    pub fn is_dirty(&self, register: usize) -> Result<bool, ChainError> {
        if register >= N {
            return Err(ChainError::RegisterOutOfRange);
        }
        Ok(self.dirty.get(register))
    }

    pub fn any_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = Bitmap::new();
    }

    /// Encodes the image into a wire frame.
    pub fn frame(&self, order: &ShiftOrder) -> [u8; N] {
        order.encode(&self.bytes)
    }

    fn store(&mut self, register: usize, byte: u8) {
        if self.bytes[register] != byte {
            self.bytes[register] = byte;
            self.dirty.set(register, true);
        }
    }
}
