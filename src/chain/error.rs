use embedded_hal::{digital, spi};

/// Errors that can occur while driving a shift-register chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
    /// Pin index is not below `8 * N`.
    AddressOutOfRange,
    /// Register index is not below `N`.
    RegisterOutOfRange,
    /// A latch, output-enable, clock or data pin reported a failure.
    Pin(digital::ErrorKind),
    /// The serial bus reported a failure.
    Bus(spi::ErrorKind),
}

impl ChainError {
    pub(crate) fn pin<E: digital::Error>(err: E) -> Self {
        ChainError::Pin(err.kind())
    }

    pub(crate) fn bus<E: spi::Error>(err: E) -> Self {
        ChainError::Bus(err.kind())
    }
}

impl core::fmt::Display for ChainError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChainError::AddressOutOfRange => write!(f, "pin index exceeds chain capacity"),
            ChainError::RegisterOutOfRange => write!(f, "register index exceeds chain length"),
            ChainError::Pin(kind) => write!(f, "output pin failed: {kind}"),
            ChainError::Bus(kind) => write!(f, "serial bus failed: {kind}"),
        }
    }
}

impl digital::Error for ChainError {
    fn kind(&self) -> digital::ErrorKind {
        match self {
            ChainError::Pin(kind) => *kind,
            _ => digital::ErrorKind::Other,
        }
    }
}
