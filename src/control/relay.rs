//! Relay activation / cooldown state machine.
//!
//! ```text
//!            any sensor asserted (re-arm)
//!        ┌──────────────────────────────────┐
//!        ▼                                  │
//!   ┌────────┐  both clear   ┌──────────┐   │   delay elapsed   ┌─────┐
//!   │ Active │ ────────────▶ │ Cooldown │ ──┼─────────────────▶ │ Off │
//!   └────────┘               └──────────┘   │                   └─────┘
//!        ▲                                  │                      │
//!        └──────────────────────────────────┴──────────────────────┘
//! ```
//!
//! Every asserted observation re-arms the cooldown window, not only the
//! rising edge: holding the door open keeps the countdown at zero. Either
//! sensor counts; there is one shared window, not one per sensor.
//!
//! The relay is energised on entry to `Active` and released on entry to
//! `Off`. `Cooldown` only differs from `Active` in that the countdown is
//! running.

use core::fmt;

use log::debug;

use crate::app::ports::{ActuatorPort, TimeBasePort};
use crate::sensors::SensorSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RelayState {
    /// A sensor is asserted; the lamp is on.
    Active,
    /// Both sensors clear; the lamp is on and the countdown runs.
    Cooldown,
    /// The lamp is off.
    #[default]
    Off,
}

impl RelayState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cooldown => "cooldown",
            Self::Off => "off",
        }
    }

    /// Whether the relay output is energised in this state.
    pub fn relay_on(self) -> bool {
        self != Self::Off
    }
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one [`RelayController::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelayStep {
    /// `(from, to)` when the state changed this step.
    pub transition: Option<(RelayState, RelayState)>,
    /// The light just went out after an activation.
    pub sleep_eligible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RelayController {
    state: RelayState,
    /// Set on every activation, cleared when the lamp goes out. Keeps the
    /// power-on `Off` state from counting as "went out".
    activated: bool,
}

impl RelayController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn has_activated(&self) -> bool {
        self.activated
    }

    /// Advance the state machine by one main-loop observation.
    pub fn update(
        &mut self,
        snapshot: &SensorSnapshot,
        timing: &impl TimeBasePort,
        actuator: &mut impl ActuatorPort,
    ) -> RelayStep {
        let mut step = RelayStep::default();

        let next = if snapshot.any_asserted() {
            timing.rearm();
            self.activated = true;
            if self.state != RelayState::Active {
                actuator.set_relay(true);
            }
            RelayState::Active
        } else if self.state != RelayState::Off && timing.take_delay_elapsed() {
            actuator.set_relay(false);
            step.sleep_eligible = core::mem::take(&mut self.activated);
            RelayState::Off
        } else if self.state == RelayState::Active {
            RelayState::Cooldown
        } else {
            self.state
        };

        if next != self.state {
            debug!("relay: {} -> {}", self.state, next);
            step.transition = Some((self.state, next));
            self.state = next;
        }
        step
    }
}
