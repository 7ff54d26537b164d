//! Lamp relay driver.
//!
//! One GPIO drives the relay coil through a transistor, active HIGH. The
//! driver remembers the commanded state so repeated commands are cheap and
//! the state can be read back for logging.
//!
//! ## Dual-target design
//!
//! Generic over an `embedded-hal` [`OutputPin`]: on ESP-IDF it wraps the
//! configured GPIO from `hw_init`; on host/test any in-memory pin works.

use embedded_hal::digital::OutputPin;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutput {
    Released,
    Energised,
}

pub struct RelayDriver<P> {
    pin: P,
    /// `None` until a write has landed.
    state: Option<RelayOutput>,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Take the pin and drive it to the released level.
    pub fn new(pin: P) -> Self {
        let mut driver = Self {
            pin,
            state: None,
        };
        driver.set(false);
        driver
    }

    /// Energise or release the coil. A failed pin write is logged and the
    /// remembered state is left unchanged.
    pub fn set(&mut self, on: bool) {
        let target = if on { RelayOutput::Energised } else { RelayOutput::Released };
        if self.state == Some(target) {
            return;
        }
        let res = if on { self.pin.set_high() } else { self.pin.set_low() };
        match res {
            Ok(()) => self.state = Some(target),
            Err(e) => warn!("relay: pin write failed ({:?}), wanted {:?}", e, target),
        }
    }

    pub fn state(&self) -> Option<RelayOutput> {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == Some(RelayOutput::Energised)
    }
}
