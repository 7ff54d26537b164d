//! Tick-driven time base shared between the timer interrupt and the main loop.
//!
//! The hardware tick is the only clock in the system. Cascaded modulo
//! counters turn it into three pulses:
//!
//! ```text
//!  tick ─┬─▶ cycles  (mod ticks_per_second) ──▶ seconds (mod 60) ──▶ minutes (mod cooldown)
//!        │                 │                                             │
//!        │                 └──▶ second pulse                             └──▶ delay elapsed
//!        └─▶ fade cycles (mod fade_interval) ──▶ fade tick
//! ```
//!
//! Every rollover subtracts the modulus instead of assigning zero, so ticks
//! that arrive late (interrupt jitter, a delayed timer task) carry forward.
//!
//! ## Sharing protocol
//!
//! [`SharedTimeBase`] is the only path to the counters. The interrupt side
//! calls [`SharedTimeBase::advance`] and only ever *raises* flags; the main
//! loop goes through [`TimeBasePort`] and only ever *consumes* them. Both
//! sides take a `critical_section` for the few instructions they need, since
//! the counters are wider than one atomic access.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::app::ports::TimeBasePort;
use crate::config::{ControllerConfig, GARAGE};

/// The firmware's single time base. The tick timer drives it; the main loop
/// reads it through [`TimeBasePort`].
pub static TIME_BASE: SharedTimeBase = SharedTimeBase::new(&GARAGE);

/// Counters and one-shot flags derived from the hardware tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBase {
    ticks_per_second: u32,
    seconds_per_minute: u32,
    cooldown_minutes: u32,
    fade_interval: u32,

    cycles: u32,
    seconds: u32,
    minutes: u32,
    fade_cycles: u32,

    fade_tick: bool,
    second_pulse: bool,
    delay_elapsed: bool,
}

impl TimeBase {
    pub const fn new(config: &ControllerConfig) -> Self {
        Self {
            ticks_per_second: config.ticks_per_second as u32,
            seconds_per_minute: config.seconds_per_minute as u32,
            cooldown_minutes: config.cooldown_minutes as u32,
            fade_interval: config.fade_interval_ticks as u32,
            cycles: 0,
            seconds: 0,
            minutes: 0,
            fade_cycles: 0,
            fade_tick: false,
            second_pulse: false,
            delay_elapsed: false,
        }
    }

    /// One hardware tick.
    pub fn on_tick(&mut self) {
        self.advance(1);
    }

    /// Apply `ticks` hardware ticks at once.
    ///
    /// Never blocks and never calls out; the caller is the interrupt.
    pub fn advance(&mut self, ticks: u32) {
        self.cycles = self.cycles.saturating_add(ticks);
        while self.cycles >= self.ticks_per_second {
            self.cycles -= self.ticks_per_second;
            self.seconds += 1;
            self.second_pulse = true;
        }
        while self.seconds >= self.seconds_per_minute {
            self.seconds -= self.seconds_per_minute;
            self.minutes += 1;
        }
        while self.minutes >= self.cooldown_minutes {
            self.minutes -= self.cooldown_minutes;
            self.delay_elapsed = true;
        }

        self.fade_cycles = self.fade_cycles.saturating_add(ticks);
        while self.fade_cycles >= self.fade_interval {
            self.fade_cycles -= self.fade_interval;
            self.fade_tick = true;
        }
    }

    /// Restart the cooldown window.
    ///
    /// Zeroes seconds and minutes and discards a pending delay flag, which
    /// belonged to the window that just got cancelled. The sub-second cycle
    /// count is left alone.
    pub fn rearm(&mut self) {
        self.seconds = 0;
        self.minutes = 0;
        self.delay_elapsed = false;
    }

    pub fn take_fade_tick(&mut self) -> bool {
        core::mem::take(&mut self.fade_tick)
    }

    pub fn take_second_pulse(&mut self) -> bool {
        core::mem::take(&mut self.second_pulse)
    }

    pub fn take_delay_elapsed(&mut self) -> bool {
        core::mem::take(&mut self.delay_elapsed)
    }

    /// Whole seconds left before the delay flag is raised.
    pub fn cooldown_remaining_secs(&self) -> u32 {
        let window = self.cooldown_minutes * self.seconds_per_minute;
        let elapsed = self.minutes * self.seconds_per_minute + self.seconds;
        window.saturating_sub(elapsed)
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn delay_elapsed(&self) -> bool {
        self.delay_elapsed
    }
}

/// A [`TimeBase`] behind a critical-section mutex.
pub struct SharedTimeBase {
    inner: Mutex<RefCell<TimeBase>>,
}

impl SharedTimeBase {
    pub const fn new(config: &ControllerConfig) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(TimeBase::new(config))),
        }
    }

    /// Interrupt entry: apply `ticks` elapsed hardware ticks.
    pub fn advance(&self, ticks: u32) {
        self.with(|tb| tb.advance(ticks));
    }

    /// Interrupt entry for a single tick.
    pub fn on_tick(&self) {
        self.advance(1);
    }

    /// Copy of the counters, for logging and tests.
    pub fn snapshot(&self) -> TimeBase {
        self.with(|tb| *tb)
    }

    fn with<R>(&self, f: impl FnOnce(&mut TimeBase) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}

impl TimeBasePort for SharedTimeBase {
    fn take_fade_tick(&self) -> bool {
        self.with(TimeBase::take_fade_tick)
    }

    fn take_second_pulse(&self) -> bool {
        self.with(TimeBase::take_second_pulse)
    }

    fn take_delay_elapsed(&self) -> bool {
        self.with(TimeBase::take_delay_elapsed)
    }

    fn rearm(&self) {
        self.with(TimeBase::rearm);
    }

    fn cooldown_remaining_secs(&self) -> u32 {
        self.with(|tb| tb.cooldown_remaining_secs())
    }
}
