//! Test support utilities - only compiled in test builds.

use core::{cell::RefCell, convert::Infallible};

use embedded_hal::{
    digital::{self, ErrorType as PinErrorType, OutputPin},
    spi::{self, ErrorType as BusErrorType, SpiBus},
};
use heapless::Vec;

use crate::chain::{
    builder::ChainBuilder,
    driver::ShiftRegister,
    image::OutputImage,
    transport::{BitBangTransport, NoTransport, SpiTransport},
};

/// Standard test configuration: 3 registers, 24 pins
pub type TestImage = OutputImage<3>;
pub type GpioDriver<'a> =
    ShiftRegister<3, MockPin<'a>, MockPin<'a>, BitBangTransport<MockPin<'a>, MockPin<'a>>>;
pub type SpiDriver<'a> = ShiftRegister<3, MockPin<'a>, MockPin<'a>, SpiTransport<MockBus<'a>>>;
pub type BaseDriver<'a> = ShiftRegister<3, MockPin<'a>, MockPin<'a>, NoTransport>;

const LOG_CAPACITY: usize = 256;
const FRAME_CAPACITY: usize = 16;

/// Identifies which line a recorded write went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinId {
    Latch,
    OutputEnable,
    Clock,
    Data,
}

/// One recorded pin or bus operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Pin(PinId, bool),
    BusWrite(Vec<u8, FRAME_CAPACITY>),
    BusRead,
    BusFlush,
}

impl Event {
    pub fn is_pin(&self, id: PinId, level: bool) -> bool {
        *self == Event::Pin(id, level)
    }

    pub fn is_data_write(&self) -> bool {
        matches!(self, Event::Pin(PinId::Data, _))
    }

    pub fn is_bus_write(&self, frame: &[u8]) -> bool {
        matches!(self, Event::BusWrite(bytes) if bytes.as_slice() == frame)
    }
}

/// Shared, ordered record of every operation the mocks see.
pub struct EventLog {
    events: RefCell<Vec<Event, LOG_CAPACITY>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn pin(&self, id: PinId) -> MockPin<'_> {
        MockPin { id, log: self }
    }

    pub fn bus(&self) -> MockBus<'_> {
        MockBus {
            log: self,
            fail: None,
        }
    }

    pub fn failing_bus(&self, kind: spi::ErrorKind) -> MockBus<'_> {
        MockBus {
            log: self,
            fail: Some(kind),
        }
    }

    pub fn events(&self) -> Vec<Event, LOG_CAPACITY> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Levels written to one line, in order.
    pub fn writes(&self, id: PinId) -> Vec<bool, LOG_CAPACITY> {
        let mut levels = Vec::new();
        for event in self.events.borrow().iter() {
            if let Event::Pin(pin, level) = event {
                if *pin == id {
                    levels.push(*level).unwrap();
                }
            }
        }
        levels
    }

    /// Last level written to one line, if any.
    pub fn level(&self, id: PinId) -> Option<bool> {
        self.writes(id).last().copied()
    }

    pub fn bus_writes(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, Event::BusWrite(_)))
            .count()
    }

    fn record(&self, event: Event) {
        self.events
            .borrow_mut()
            .push(event)
            .expect("event log full");
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Output pin that records every level it is driven to.
pub struct MockPin<'a> {
    id: PinId,
    log: &'a EventLog,
}

impl PinErrorType for MockPin<'_> {
    type Error = Infallible;
}

impl OutputPin for MockPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.record(Event::Pin(self.id, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.record(Event::Pin(self.id, true));
        Ok(())
    }
}

/// Error reported by [`FaultyPin`].
#[derive(Debug)]
pub struct MockFault;

impl digital::Error for MockFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// Output pin whose every write fails.
pub struct FaultyPin;

impl PinErrorType for FaultyPin {
    type Error = MockFault;
}

impl OutputPin for FaultyPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(MockFault)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(MockFault)
    }
}

/// SPI bus that records writes and flushes.
pub struct MockBus<'a> {
    log: &'a EventLog,
    fail: Option<spi::ErrorKind>,
}

impl MockBus<'_> {
    fn check(&self) -> Result<(), spi::ErrorKind> {
        match self.fail {
            Some(kind) => Err(kind),
            None => Ok(()),
        }
    }
}

impl BusErrorType for MockBus<'_> {
    type Error = spi::ErrorKind;
}

impl SpiBus<u8> for MockBus<'_> {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.check()?;
        words.fill(0);
        self.log.record(Event::BusRead);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.check()?;
        let frame = Vec::from_slice(words).expect("frame too long");
        self.log.record(Event::BusWrite(frame));
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.write(write)?;
        read.fill(0);
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.write(words)?;
        words.fill(0);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.log.record(Event::BusFlush);
        Ok(())
    }
}

/// Bit-banged driver with every line recorded.
pub fn gpio_driver(log: &EventLog) -> GpioDriver<'_> {
    ChainBuilder::new()
        .registers::<3>()
        .latch(log.pin(PinId::Latch))
        .output_enable(log.pin(PinId::OutputEnable))
        .bit_bang(log.pin(PinId::Clock), log.pin(PinId::Data))
        .build()
}

/// SPI driver with every line recorded.
pub fn spi_driver(log: &EventLog) -> SpiDriver<'_> {
    ChainBuilder::new()
        .registers::<3>()
        .latch(log.pin(PinId::Latch))
        .output_enable(log.pin(PinId::OutputEnable))
        .spi(log.bus())
        .build()
}

/// Driver with latch and output-enable but no serial output.
pub fn base_driver(log: &EventLog) -> BaseDriver<'_> {
    ChainBuilder::new()
        .registers::<3>()
        .latch(log.pin(PinId::Latch))
        .output_enable(log.pin(PinId::OutputEnable))
        .no_transport()
        .build()
}

/// Asserts the last two events are a complete latch pulse.
pub fn assert_ends_with_latch_pulse(log: &EventLog) {
    let events = log.events();
    let n = events.len();
    assert!(n >= 2, "expected a latch pulse, got {:?}", events);
    assert_eq!(events[n - 2], Event::Pin(PinId::Latch, true));
    assert_eq!(events[n - 1], Event::Pin(PinId::Latch, false));
}
