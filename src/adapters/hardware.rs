//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the two input lines and the output drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`]. Everything is generic over
//! `embedded-hal` pin traits: the firmware plugs in the `hw_init` handles,
//! tests plug in in-memory pins.

use embedded_hal::digital::{Error as _, InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::config::ControllerConfig;
use crate::drivers::indicator::Indicator;
use crate::drivers::relay::RelayDriver;
use crate::sensors::SensorId;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<D, M, R, L> {
    door: D,
    motion: M,
    door_idle: bool,
    motion_idle: bool,
    relay: RelayDriver<R>,
    indicator: Indicator<L>,
}

impl<D, M, R, L> HardwareAdapter<D, M, R, L>
where
    D: InputPin,
    M: InputPin,
    R: OutputPin,
    L: SetDutyCycle,
{
    pub fn new(config: &ControllerConfig, door: D, motion: M, relay: R, indicator: L) -> Self {
        Self {
            door,
            motion,
            door_idle: config.door_idle_level(),
            motion_idle: config.motion_idle_level(),
            relay: RelayDriver::new(relay),
            indicator: Indicator::new(indicator, config.intensity_max),
        }
    }

    pub fn relay(&self) -> &RelayDriver<R> {
        &self.relay
    }

    pub fn indicator(&self) -> &Indicator<L> {
        &self.indicator
    }
}

/// A read error answers with the idle level, so a broken line reads as
/// "nothing happening" instead of keeping the lamp on.
fn read_or_idle<P: InputPin>(pin: &mut P, idle: bool, sensor: SensorId) -> bool {
    match pin.is_high() {
        Ok(level) => level,
        Err(e) => {
            warn!("{}: read failed ({:?}), assuming idle", sensor.name(), e.kind());
            idle
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<D, M, R, L> SensorPort for HardwareAdapter<D, M, R, L>
where
    D: InputPin,
    M: InputPin,
    R: OutputPin,
    L: SetDutyCycle,
{
    fn read_raw(&mut self, sensor: SensorId) -> bool {
        match sensor {
            SensorId::Door => read_or_idle(&mut self.door, self.door_idle, sensor),
            SensorId::Motion => read_or_idle(&mut self.motion, self.motion_idle, sensor),
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<D, M, R, L> ActuatorPort for HardwareAdapter<D, M, R, L>
where
    D: InputPin,
    M: InputPin,
    R: OutputPin,
    L: SetDutyCycle,
{
    fn set_relay(&mut self, on: bool) {
        self.relay.set(on);
    }

    fn set_intensity(&mut self, level: u8) {
        self.indicator.set_level(level);
    }
}
