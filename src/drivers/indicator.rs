//! Indicator LED driver.
//!
//! One PWM channel dims a single LED. Levels are in the controller's
//! intensity scale (`0..=full_scale`) and converted to the channel's duty
//! resolution with `set_duty_cycle_fraction`, so the same level means the
//! same brightness whatever the LEDC bit width.
//!
//! ## Dual-target design
//!
//! Generic over an `embedded-hal` [`SetDutyCycle`] channel: on ESP-IDF the
//! LEDC channel from `hw_init`; on host/test an in-memory channel.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

pub struct Indicator<C> {
    channel: C,
    full_scale: u8,
    level: u8,
}

impl<C: SetDutyCycle> Indicator<C> {
    /// `full_scale` is the level that maps to 100 % duty; must be non-zero.
    pub fn new(channel: C, full_scale: u8) -> Self {
        Self {
            channel,
            full_scale: full_scale.max(1),
            level: 0,
        }
    }

    pub fn set_level(&mut self, level: u8) {
        let level = level.min(self.full_scale);
        match self
            .channel
            .set_duty_cycle_fraction(u16::from(level), u16::from(self.full_scale))
        {
            Ok(()) => self.level = level,
            Err(e) => warn!("indicator: duty write failed ({:?})", e),
        }
    }

    pub fn off(&mut self) {
        self.set_level(0);
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}
