//! Basic example: Driving a two-register chain from virtual pins
//!
//! This example demonstrates:
//! - Building a bit-banged chain with an output-enable pin
//! - The setup sequence and first latch
//! - Handing single bits out as ordinary output pins
//! - Batching writes with a deferred flush policy

use core::convert::Infallible;
use std::cell::Cell;

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hc595::prelude::*;

/// GPIO that prints level changes and counts clock pulses.
struct ConsolePin<'a> {
    name: &'static str,
    pulses: &'a Cell<usize>,
    quiet: bool,
}

impl<'a> ConsolePin<'a> {
    fn new(name: &'static str, quiet: bool, pulses: &'a Cell<usize>) -> Self {
        Self {
            name,
            pulses,
            quiet,
        }
    }
}

impl ErrorType for ConsolePin<'_> {
    type Error = Infallible;
}

impl OutputPin for ConsolePin<'_> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        if !self.quiet {
            println!("  {} -> low", self.name);
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if self.quiet {
            self.pulses.set(self.pulses.get() + 1);
        } else {
            println!("  {} -> high", self.name);
        }
        Ok(())
    }
}

fn main() {
    println!("=== 74HC595 Basic Example ===\n");

    let clock_pulses = Cell::new(0);
    let unused = Cell::new(0);

    let driver = ChainBuilder::new()
        .registers::<2>()
        .latch(ConsolePin::new("RCLK", false, &unused))
        .output_enable(ConsolePin::new("OE", false, &unused))
        .bit_bang(
            ConsolePin::new("SRCLK", true, &clock_pulses),
            ConsolePin::new("SER", true, &unused),
        )
        .build();

    println!("Setup:");
    let chain = SharedChain::new(driver, FlushPolicy::Deferred);
    chain.setup().unwrap();

    println!("\nFirst latch, then enable outputs:");
    chain.flush().unwrap();
    chain.with_driver(|driver| driver.enable_outputs()).unwrap();

    // Pins 0..8 are the register nearest the controller
    let mut status_led = chain.pin(0).unwrap();
    let mut relay = chain.pin(9).unwrap().inverted();

    status_led.set_high().unwrap();
    relay.set_high().unwrap();

    chain.with_driver(|driver| {
        println!("\nImage before flush: {:02X?}", driver.image().as_bytes());
    });

    println!("\nFlush:");
    chain.flush().unwrap();
    println!("  {} clock pulses so far", clock_pulses.get());

    println!("\nOut-of-range pin:");
    match chain.pin(16) {
        Ok(_) => println!("  unexpected pin"),
        Err(err) => println!("  rejected: {err}"),
    }

    println!("\nDone");
}
