//! Indicator brightness fader.
//!
//! On each fade tick the intensity moves one step toward its target:
//! up to `intensity_max` while either sensor is asserted, down to
//! `intensity_min` once both are clear. The value is clamped after every
//! step, so a step that does not divide the range evenly still lands on
//! the bound instead of overshooting it.

use crate::config::ControllerConfig;
use crate::sensors::SensorSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fader {
    value: u8,
    min: u8,
    max: u8,
    step: u8,
}

impl Fader {
    /// A fader resting at the minimum.
    pub fn new(config: &ControllerConfig) -> Self {
        Self::starting_at(config, config.intensity_min)
    }

    /// A fader starting at `value`, clamped into range.
    pub fn starting_at(config: &ControllerConfig, value: u8) -> Self {
        Self {
            value: value.clamp(config.intensity_min, config.intensity_max),
            min: config.intensity_min,
            max: config.intensity_max,
            step: config.fade_step,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Where the fader is heading for this snapshot.
    pub fn target(&self, snapshot: &SensorSnapshot) -> u8 {
        if snapshot.any_asserted() { self.max } else { self.min }
    }

    /// Apply one fade tick. Returns the new value, or `None` when the fader
    /// was already resting at its target.
    pub fn step(&mut self, snapshot: &SensorSnapshot) -> Option<u8> {
        let target = self.target(snapshot);
        let next = if self.value < target {
            self.value.saturating_add(self.step).min(self.max)
        } else if self.value > target {
            self.value.saturating_sub(self.step).max(self.min)
        } else {
            return None;
        };
        self.value = next;
        Some(next)
    }
}
