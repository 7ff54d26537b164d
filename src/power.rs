//! Light-sleep policy.
//!
//! The controller may sleep only right after the lamp went out following a
//! real activation. At power-on both sensors usually read clear and the relay
//! is already `Off`; that must not put the board to sleep before anyone has
//! opened the door.
//!
//! ```text
//!   relay Cooldown → Off (after activation)
//!        │
//!        ▼  request_sleep()
//!   ┌─────────┐  service()   arm edges ▶ enter_low_power ▶ disarm
//!   │ pending │ ───────────▶ ─────────────────────────────────────▶ awake
//!   └─────────┘
//! ```
//!
//! The sleep itself has no timeout. Only a sensor edge ends it.

use log::info;

use crate::app::ports::SleepPort;
use crate::config::ControllerConfig;
use crate::sensors::SensorId;

#[derive(Debug, Clone)]
pub struct PowerManager {
    enabled: bool,
    pending: bool,
    sleep_count: u32,
}

impl PowerManager {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            enabled: config.sleep_enabled,
            pending: false,
            sleep_count: 0,
        }
    }

    /// The relay state machine reported the lamp went out after an activation.
    pub fn request_sleep(&mut self) {
        self.pending = true;
    }

    /// Whether the next [`service`](Self::service) call will sleep.
    pub fn will_sleep(&self) -> bool {
        self.pending && self.enabled
    }

    pub fn sleep_count(&self) -> u32 {
        self.sleep_count
    }

    /// Consume a pending request. Returns `true` after a sleep and wake-up.
    ///
    /// Blocks inside [`SleepPort::enter_low_power`] until a sensor edge.
    pub fn service(&mut self, port: &mut impl SleepPort) -> bool {
        if !core::mem::take(&mut self.pending) || !self.enabled {
            return false;
        }

        port.arm_wake_on_edge(&SensorId::ALL);
        info!("power: entering light sleep (wake on door/motion edge)");
        port.enter_low_power();
        port.disarm();

        self.sleep_count = self.sleep_count.wrapping_add(1);
        info!("power: woke (sleep #{})", self.sleep_count);
        true
    }
}
