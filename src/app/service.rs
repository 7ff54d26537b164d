//! Garage controller service — the hexagonal core.
//!
//! [`GarageController`] owns the debounce filters, the relay state machine,
//! the indicator fader and the sleep policy. All I/O flows through port
//! traits injected at call sites, making the whole controller testable
//! with mock adapters and a host-side time base.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                  │       GarageController       │
//! ActuatorPort ◀── │ debounce · relay · fade ·    │ ──▶ SleepPort
//!                  │ power                        │
//!  TimeBasePort ──▶└──────────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::ControllerConfig;
use crate::control::fader::Fader;
use crate::control::relay::{RelayController, RelayState};
use crate::power::PowerManager;
use crate::sensors::{SensorHub, SensorSnapshot};

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort, SleepPort, TimeBasePort};

/// Summary of one [`GarageController::run_once`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iteration {
    pub sensors: SensorSnapshot,
    pub relay: RelayState,
    pub intensity: u8,
    /// The controller slept and woke during this iteration.
    pub slept: bool,
}

// ───────────────────────────────────────────────────────────────
// GarageController
// ───────────────────────────────────────────────────────────────

pub struct GarageController {
    sensors: SensorHub,
    relay: RelayController,
    fader: Fader,
    power: PowerManager,
    iterations: u64,
}

impl GarageController {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            sensors: SensorHub::new(config),
            relay: RelayController::new(),
            fader: Fader::new(config),
            power: PowerManager::new(config),
            iterations: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive outputs to their power-on state and announce the start.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.set_relay(false);
        hw.set_intensity(self.fader.value());
        sink.emit(&AppEvent::Started);
        info!("GarageController started (relay {})", self.relay.state());
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// One main-loop pass: sample → relay → fade → countdown → sleep.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`]; this avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn run_once(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        timing: &impl TimeBasePort,
        sleep: &mut impl SleepPort,
        sink: &mut impl EventSink,
    ) -> Iteration {
        self.iterations = self.iterations.wrapping_add(1);

        // 1. Debounced sensor view
        let snapshot = self.sensors.sample(hw);

        // 2. Relay state machine
        let step = self.relay.update(&snapshot, timing, hw);
        if let Some((from, to)) = step.transition {
            sink.emit(&AppEvent::RelayChanged { from, to });
        }
        if step.sleep_eligible {
            self.power.request_sleep();
        }

        // 3. Indicator fade
        if timing.take_fade_tick() {
            if let Some(level) = self.fader.step(&snapshot) {
                hw.set_intensity(level);
            }
        }

        // 4. Countdown report
        if timing.take_second_pulse() && self.relay.state() == RelayState::Cooldown {
            let secs = timing.cooldown_remaining_secs();
            debug!("cooldown: {}s left", secs);
            sink.emit(&AppEvent::CooldownRemaining(secs));
        }

        // 5. Sleep policy
        let mut slept = false;
        if self.power.will_sleep() {
            sink.emit(&AppEvent::SleepRequested);
        }
        if self.power.service(sleep) {
            slept = true;
            sink.emit(&AppEvent::Woke);
        }

        Iteration {
            sensors: snapshot,
            relay: self.relay.state(),
            intensity: self.fader.value(),
            slept,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn relay_state(&self) -> RelayState {
        self.relay.state()
    }

    pub fn intensity(&self) -> u8 {
        self.fader.value()
    }

    pub fn has_activated(&self) -> bool {
        self.relay.has_activated()
    }

    pub fn sleep_count(&self) -> u32 {
        self.power.sleep_count()
    }

    /// Main-loop passes since startup.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}
