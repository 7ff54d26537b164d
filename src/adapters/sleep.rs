//! Light-sleep adapter — implements [`SleepPort`] with ESP-IDF light sleep.
//!
//! The GPIO wake-up source of the ESP32-S3 triggers on a *level*, not an
//! edge. "Wake on any edge" is armed as "wake on the level opposite to the
//! one read right now", which fires on the first transition away from the
//! current state.
//!
//! RAM, registers and the relay GPIO hold survive light sleep, so the
//! controller resumes in the same loop iteration it slept in.

use heapless::Vec;
use log::{debug, warn};

use crate::app::ports::SleepPort;
use crate::drivers::hw_init;
use crate::pins;
use crate::sensors::SensorId;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

fn gpio_for(sensor: SensorId) -> i32 {
    match sensor {
        SensorId::Door => pins::DOOR_GPIO,
        SensorId::Motion => pins::MOTION_GPIO,
    }
}

/// One armed wake-up line and the level that ends sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeLine {
    pub gpio: i32,
    pub wake_high: bool,
}

#[derive(Debug, Default)]
pub struct LightSleep {
    armed: Vec<WakeLine, 2>,
}

impl LightSleep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed(&self) -> &[WakeLine] {
        &self.armed
    }
}

impl SleepPort for LightSleep {
    fn arm_wake_on_edge(&mut self, sensors: &[SensorId]) {
        for &sensor in sensors {
            let gpio = gpio_for(sensor);
            if self.armed.iter().any(|l| l.gpio == gpio) {
                continue;
            }
            let line = WakeLine {
                gpio,
                wake_high: !hw_init::gpio_read(gpio),
            };
            if arm_line(line) && self.armed.push(line).is_err() {
                warn!("sleep: wake table full, {} not armed", sensor.name());
            }
        }
        enable_gpio_wakeup();
        debug!("sleep: armed {:?}", self.armed);
    }

    fn enter_low_power(&mut self) {
        if self.armed.is_empty() {
            warn!("sleep: no wake line armed, staying awake");
            return;
        }
        light_sleep_start();
    }

    fn disarm(&mut self) {
        for line in &self.armed {
            disarm_line(line.gpio);
        }
        self.armed.clear();
        disable_gpio_wakeup();
    }
}

// ── Platform calls ────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn arm_line(line: WakeLine) -> bool {
    let level = if line.wake_high {
        gpio_int_type_t_GPIO_INTR_HIGH_LEVEL
    } else {
        gpio_int_type_t_GPIO_INTR_LOW_LEVEL
    };
    // SAFETY: the pin is a configured input; called from the main task only.
    let ret = unsafe { gpio_wakeup_enable(line.gpio, level) };
    if ret != ESP_OK as i32 {
        warn!("sleep: gpio_wakeup_enable({}) failed (rc={})", line.gpio, ret);
        return false;
    }
    true
}

#[cfg(not(target_os = "espidf"))]
fn arm_line(line: WakeLine) -> bool {
    log::trace!("sleep(sim): wake gpio {} on {}", line.gpio, if line.wake_high { "high" } else { "low" });
    true
}

#[cfg(target_os = "espidf")]
fn enable_gpio_wakeup() {
    // SAFETY: plain configuration call, main task only.
    unsafe { esp_sleep_enable_gpio_wakeup() };
}

#[cfg(not(target_os = "espidf"))]
fn enable_gpio_wakeup() {}

#[cfg(target_os = "espidf")]
fn light_sleep_start() {
    // SAFETY: blocks the calling task until a wake source fires.
    let ret = unsafe { esp_light_sleep_start() };
    if ret != ESP_OK as i32 {
        warn!("sleep: esp_light_sleep_start rejected (rc={})", ret);
    }
}

#[cfg(not(target_os = "espidf"))]
fn light_sleep_start() {
    log::info!("sleep(sim): light sleep skipped");
}

#[cfg(target_os = "espidf")]
fn disarm_line(gpio: i32) {
    // SAFETY: undoes gpio_wakeup_enable on the same pin.
    unsafe { gpio_wakeup_disable(gpio) };
}

#[cfg(not(target_os = "espidf"))]
fn disarm_line(_gpio: i32) {}

#[cfg(target_os = "espidf")]
fn disable_gpio_wakeup() {
    // SAFETY: removing a wake source that may or may not be enabled is allowed.
    unsafe { esp_sleep_disable_wakeup_source(esp_sleep_source_t_ESP_SLEEP_WAKEUP_GPIO) };
}

#[cfg(not(target_os = "espidf"))]
fn disable_gpio_wakeup() {}
