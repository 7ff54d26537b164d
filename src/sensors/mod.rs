//! Sensor subsystem — the two binary inputs and the aggregating [`SensorHub`].
//!
//! The hub owns one [`DebounceFilter`] per line and produces a
//! [`SensorSnapshot`] each main-loop iteration. Raw reads come through
//! [`SensorPort`], so the hub works the same against real GPIO and mocks.

pub mod debounce;

use crate::app::ports::SensorPort;
use crate::config::ControllerConfig;
use debounce::DebounceFilter;

/// The two inputs of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorId {
    /// Reed switch on the door.
    Door,
    /// PIR motion detector.
    Motion,
}

impl SensorId {
    pub const ALL: [Self; 2] = [Self::Door, Self::Motion];

    pub fn name(self) -> &'static str {
        match self {
            Self::Door => "door",
            Self::Motion => "motion",
        }
    }
}

/// Debounced state of one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorState {
    Asserted,
    #[default]
    Cleared,
}

impl SensorState {
    pub fn is_asserted(self) -> bool {
        self == Self::Asserted
    }
}

/// Debounced view of both inputs for one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorSnapshot {
    pub door: SensorState,
    pub motion: SensorState,
}

impl SensorSnapshot {
    pub fn any_asserted(&self) -> bool {
        self.door.is_asserted() || self.motion.is_asserted()
    }

    pub fn all_cleared(&self) -> bool {
        !self.any_asserted()
    }

    pub fn get(&self, id: SensorId) -> SensorState {
        match id {
            SensorId::Door => self.door,
            SensorId::Motion => self.motion,
        }
    }
}

/// Debounces both input lines.
#[derive(Debug, Clone)]
pub struct SensorHub {
    door: DebounceFilter,
    motion: DebounceFilter,
}

impl SensorHub {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            door: DebounceFilter::new(config.door_active_low),
            motion: DebounceFilter::new(config.motion_active_low),
        }
    }

    /// Read both raw lines once and debounce them.
    pub fn sample(&mut self, port: &mut impl SensorPort) -> SensorSnapshot {
        let door_raw = port.read_raw(SensorId::Door);
        let motion_raw = port.read_raw(SensorId::Motion);
        SensorSnapshot {
            door: self.door.update(door_raw),
            motion: self.motion.update(motion_raw),
        }
    }

    pub fn filter(&self, id: SensorId) -> &DebounceFilter {
        match id {
            SensorId::Door => &self.door,
            SensorId::Motion => &self.motion,
        }
    }
}
