//! Two-sample debounce for one binary input line.
//!
//! A line is reported ASSERTED only when the current and the previous raw
//! sample both read the active level. Anything else reports CLEARED, so a
//! single stable sample at the idle level releases immediately while a
//! single glitch at the active level never asserts:
//!
//! ```text
//!   raw (active=1)  0  1  1  0  1  1  1
//!   state           C  C  A  C  C  A  A
//! ```
//!
//! The asymmetry is intended: a bounce delays activation by one sample, and
//! a release is never delayed. Polarity is fixed at construction; the
//! door reed switch is active-low.

use super::SensorState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceFilter {
    previous_raw: bool,
    active_level: bool,
}

impl DebounceFilter {
    /// The filter starts as if the line had been idle.
    pub const fn new(active_low: bool) -> Self {
        let active_level = !active_low;
        Self {
            previous_raw: !active_level,
            active_level,
        }
    }

    /// Feed one raw sample, return the debounced state.
    pub fn update(&mut self, raw: bool) -> SensorState {
        let asserted = raw == self.active_level && self.previous_raw == self.active_level;
        self.previous_raw = raw;
        if asserted {
            SensorState::Asserted
        } else {
            SensorState::Cleared
        }
    }

    pub fn active_level(&self) -> bool {
        self.active_level
    }

    pub fn idle_level(&self) -> bool {
        !self.active_level
    }
}
