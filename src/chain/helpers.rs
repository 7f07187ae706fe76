//! Chip-family constants and pin addressing.
//!
//! These helpers map a logical pin index onto a register and a bit within
//! it. They are useful when building pin maps or diagnostics on top of a
//! [`ShiftRegister`](crate::chain::ShiftRegister).

use embedded_hal::digital::PinState;

use crate::chain::ChainError;

/// Number of outputs on each register of the chain.
pub const BITS_PER_REGISTER: usize = 8;

/// Output-enable level that suppresses the register outputs.
pub const OUTPUT_DISABLED: PinState = PinState::High;

/// Output-enable level that drives the register outputs.
pub const OUTPUT_ENABLED: PinState = PinState::Low;

/// Calculates where a pin lives in an `N`-register chain.
///
/// Returns `(register, bit)`, where `bit` 0 is the least-significant bit of
/// the register byte.
///
/// # Arguments
/// * `index` - Logical pin index
///
/// # Type Parameters
/// * `N` - Number of registers in the chain
///
/// # Errors
/// * [`ChainError::AddressOutOfRange`] - if `index >= 8 * N`
///
/// # Example
/// ```
/// use embedded_hc595::chain::helpers::pin_location;
///
/// // Three registers expose pins 0..24
/// assert_eq!(pin_location::<3>(0), Ok((0, 0)));
/// assert_eq!(pin_location::<3>(13), Ok((1, 5)));
/// assert!(pin_location::<3>(24).is_err());
/// ```
pub fn pin_location<const N: usize>(index: u16) -> Result<(usize, u8), ChainError> {
    let index = index as usize;
    if index >= pin_count::<N>() {
        return Err(ChainError::AddressOutOfRange);
    }

    Ok((index / BITS_PER_REGISTER, (index % BITS_PER_REGISTER) as u8))
}

/// Total number of addressable pins in an `N`-register chain.
pub const fn pin_count<const N: usize>() -> usize {
    N * BITS_PER_REGISTER
}

/// Single-bit mask for `bit` within a register byte.
#[inline]
pub(crate) const fn bit_mask(bit: u8) -> u8 {
    1 << bit
}

#[test]
fn pin_location_edge_cases() {
    // First pin of the first register
    assert_eq!(pin_location::<1>(0), Ok((0, 0)));

    // Last pin of a single register
    assert_eq!(pin_location::<1>(7), Ok((0, 7)));

    // Register boundary
    assert_eq!(pin_location::<3>(8), Ok((1, 0)));

    // Last valid pin of a 3-register chain
    assert_eq!(pin_location::<3>(23), Ok((2, 7)));

    // One past the end
    assert_eq!(
        pin_location::<3>(24),
        Err(ChainError::AddressOutOfRange)
    );

    // Far past the end
    assert_eq!(
        pin_location::<3>(u16::MAX),
        Err(ChainError::AddressOutOfRange)
    );
}

#[test]
fn bit_mask_matches_bit_position() {
    assert_eq!(bit_mask(0), 0x01);
    assert_eq!(bit_mask(5), 0x20);
    assert_eq!(bit_mask(7), 0x80);
}
