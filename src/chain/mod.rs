pub mod builder;
pub mod driver;
pub mod error;
pub mod helpers;
pub mod image;
pub mod order;
pub mod pin;
pub mod shared;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use builder::ChainBuilder;
pub use driver::ShiftRegister;
pub use error::ChainError;
pub use helpers::{BITS_PER_REGISTER, OUTPUT_DISABLED, OUTPUT_ENABLED};
pub use image::OutputImage;
pub use order::{BitOrder, ChainOrder, ShiftOrder};
pub use pin::{ChainPin, NoPin};
pub use shared::{FlushPolicy, SharedChain};
pub use transport::{BitBangTransport, NoTransport, SpiTransport, Transport};

pub mod prelude {
    pub use super::{
        BitBangTransport, BitOrder, ChainBuilder, ChainError, ChainOrder, ChainPin, FlushPolicy,
        NoPin, NoTransport, OutputImage, SharedChain, ShiftOrder, ShiftRegister, SpiTransport,
        Transport,
    };
}
