//! A `no_std`, no-alloc driver for SN74HC595 shift-register chains.
//!
//! This crate keeps a bit-packed image of every output in a chain of
//! daisy-chained 8-bit registers, pushes it to the hardware through a
//! pluggable transport, and latches the result in one pulse so all outputs
//! change together.
//!
//! # Features
//!
//! - **Zero heap allocation** - The output image is a `[u8; N]`
//! - **Three transports** - Bit-banged GPIO, SPI bus, or no-op bookkeeping
//! - **Per-register dirty tracking** - Skip flushes when nothing changed
//! - **Virtual pins** - Any bit of the chain is an `embedded-hal` [`OutputPin`]
//! - **Configurable wiring** - Bit order and chain order are options, not guesses
//!
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐ write  ┌───────────────────────┐ frame ┌─────────────┐
//! │  ChainPin 0  │───────▶│     ShiftRegister     │──────▶│  Transport  │──▶ SER/SRCLK
//! │  ChainPin 5  │───────▶│  ┌─────────────────┐  │       └─────────────┘
//! │  ChainPin 17 │───────▶│  │ OutputImage [N] │  │ pulse ┌─────────────┐
//! └──────────────┘        │  └─────────────────┘  │──────▶│  Latch pin  │──▶ RCLK
//!    (borrow a            └───────────────────────┘       └─────────────┘
//!     SharedChain)
//! ```
//!
//! - **Pin writes** update one bit of the image and mark its register dirty
//! - **Flushes** encode the image into a wire frame, hand it to the transport,
//!   then pulse the latch high and low
//! - **Output-enable** is only driven by setup and by explicit calls, never by a flush
//!
//! # Example
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::digital::{ErrorType, OutputPin};
//! use embedded_hc595::prelude::*;
//!
//! # struct Gpio;
//! # impl ErrorType for Gpio { type Error = Infallible; }
//! # impl OutputPin for Gpio {
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! // Two chained registers driven over three GPIO lines
//! let mut driver = ChainBuilder::new()
//!     .registers::<2>()
//!     .latch(Gpio)
//!     .output_enable(Gpio)
//!     .bit_bang(Gpio, Gpio)
//!     .build();
//!
//! driver.setup().unwrap();
//! driver.write_gpio().unwrap();
//! driver.enable_outputs().unwrap();
//!
//! // Hand individual bits to code that only knows about output pins
//! let chain = SharedChain::new(driver, FlushPolicy::Immediate);
//! let mut relay = chain.pin(9).unwrap();
//! relay.set_high().unwrap();
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod chain;

pub mod prelude {
    pub use crate::chain::prelude::*;
}
