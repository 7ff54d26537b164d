//! Port traits — the hexagonal boundary between the control core and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ GarageController (domain)
//! ```
//!
//! Driven adapters (input lines, relay and indicator, light sleep, event
//! sinks) implement these traits. The
//! [`GarageController`](super::service::GarageController) consumes them via
//! generics, so the control core never touches hardware directly and every
//! port can be mocked on the host.
//!
//! None of the ports return errors. A read that fails is answered with the
//! line's idle level and a failed write is logged by the adapter; the
//! control core always sees a total function.

use crate::sensors::SensorId;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the raw, undebounced level of one sensor line.
pub trait SensorPort {
    /// `true` = line high. Non-blocking.
    fn read_raw(&mut self, sensor: SensorId) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port. Both calls are idempotent.
pub trait ActuatorPort {
    /// Energise (`true`) or release the lamp relay.
    fn set_relay(&mut self, on: bool);

    /// Drive the indicator at `level`, within the configured intensity range.
    fn set_intensity(&mut self, level: u8);
}

// ───────────────────────────────────────────────────────────────
// Sleep port (driven adapter: domain → power management)
// ───────────────────────────────────────────────────────────────

/// Platform low-power primitive, with the wake condition passed explicitly.
pub trait SleepPort {
    /// Arm a wake-up on any edge of the listed sensor lines.
    fn arm_wake_on_edge(&mut self, sensors: &[SensorId]);

    /// Suspend until an armed edge occurs. There is no timeout.
    fn enter_low_power(&mut self);

    /// Remove every wake condition set by [`arm_wake_on_edge`](Self::arm_wake_on_edge).
    fn disarm(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Time base port (main-loop side of the tick counters)
// ───────────────────────────────────────────────────────────────

/// Consumer side of the tick-driven counters.
///
/// The tick interrupt only raises flags; these methods are the only place
/// they get cleared. Every method is one short critical section.
pub trait TimeBasePort {
    fn take_fade_tick(&self) -> bool;

    fn take_second_pulse(&self) -> bool;

    fn take_delay_elapsed(&self) -> bool;

    /// Restart the cooldown window from zero.
    fn rearm(&self);

    fn cooldown_remaining_secs(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / serial)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port. Adapters
/// decide where they go (log console, diagnostic UART).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

/// Fan out to two sinks, first `A` then `B`.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &AppEvent) {
        (**self).emit(event);
    }
}
