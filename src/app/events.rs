//! Outbound application events.
//!
//! The [`GarageController`](super::service::GarageController) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them: log to the console or write the
//! countdown to the diagnostic UART.

use crate::control::relay::RelayState;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has started (relay off, indicator at minimum).
    Started,

    /// The relay state machine moved between states.
    RelayChanged { from: RelayState, to: RelayState },

    /// Seconds left before the relay drops out; once per second in cooldown.
    CooldownRemaining(u32),

    /// The light went out after an activation; about to enter light sleep.
    SleepRequested,

    /// A sensor edge ended light sleep.
    Woke,
}
