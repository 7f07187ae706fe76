//! Wiring conventions that decide how the output image is serialized.
//!
//! The last bit shifted into a 74HC595 ends up on `QA` of the register
//! nearest the controller, and the first bit shifted ends up on `QH` of the
//! register farthest away. Which image byte and which bit that corresponds
//! to depends on how the board is wired, so both are options.

/// Order in which the bits of one register byte are shifted out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    /// Bit 7 first, so bit 0 lands on `QA`.
    #[default]
    MsbFirst,
    /// Bit 0 first, so bit 0 lands on `QH`.
    LsbFirst,
}

/// Which end of the chain image byte 0 describes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChainOrder {
    /// Image byte 0 is the register wired to the controller; it is sent last.
    #[default]
    NearestFirst,
    /// Image byte 0 is the far end of the chain; it is sent first.
    FarthestFirst,
}

/// Bit and chain order used to turn the image into a wire frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShiftOrder {
    pub bit_order: BitOrder,
    pub chain_order: ChainOrder,
}

impl ShiftOrder {
    /// Pin 0 is `QA` of the register nearest the controller.
    pub const NEAREST_MSB_FIRST: Self = Self {
        bit_order: BitOrder::MsbFirst,
        chain_order: ChainOrder::NearestFirst,
    };

    /// Bit 0 of image byte 0 is the first bit on the wire.
    pub const FORWARD_LSB_FIRST: Self = Self {
        bit_order: BitOrder::LsbFirst,
        chain_order: ChainOrder::FarthestFirst,
    };

    pub const fn new(bit_order: BitOrder, chain_order: ChainOrder) -> Self {
        Self {
            bit_order,
            chain_order,
        }
    }

    /// Encodes `image` into the frame a transport shifts out.
    ///
    /// Frame byte 0 goes on the wire first, and every frame byte is shifted
    /// most-significant bit first.
    pub fn encode<const N: usize>(&self, image: &[u8; N]) -> [u8; N] {
        let mut frame = [0u8; N];
        for (slot, wire) in frame.iter_mut().enumerate() {
            let byte = match self.chain_order {
                ChainOrder::NearestFirst => image[N - 1 - slot],
                ChainOrder::FarthestFirst => image[slot],
            };
            *wire = match self.bit_order {
                BitOrder::MsbFirst => byte,
                BitOrder::LsbFirst => byte.reverse_bits(),
            };
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: [u8; 3] = [0x01, 0x80, 0x0F];

    #[test]
    fn default_order_sends_nearest_register_last() {
        assert_eq!(ShiftOrder::default(), ShiftOrder::NEAREST_MSB_FIRST);
        assert_eq!(
            ShiftOrder::NEAREST_MSB_FIRST.encode(&IMAGE),
            [0x0F, 0x80, 0x01]
        );
    }

    #[test]
    fn forward_lsb_first_puts_bit_zero_of_byte_zero_on_the_wire_first() {
        let frame = ShiftOrder::FORWARD_LSB_FIRST.encode(&IMAGE);
        assert_eq!(frame, [0x80, 0x01, 0xF0]);
        // MSB of the first frame byte is bit 0 of image byte 0
        assert_eq!(frame[0] >> 7, IMAGE[0] & 1);
    }

    #[test]
    fn mixed_orders() {
        let order = ShiftOrder::new(BitOrder::MsbFirst, ChainOrder::FarthestFirst);
        assert_eq!(order.encode(&IMAGE), IMAGE);

        let order = ShiftOrder::new(BitOrder::LsbFirst, ChainOrder::NearestFirst);
        assert_eq!(order.encode(&IMAGE), [0xF0, 0x01, 0x80]);
    }
}
