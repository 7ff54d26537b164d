//! Garage light controller firmware library.
//!
//! Exposes the control core and its adapters for integration testing and
//! for the firmware binary. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module; the host build gets
//! simulation stubs.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod diagnostics;
pub mod error;
pub mod pins;
pub mod power;
pub mod sensors;
pub mod timebase;

pub mod adapters;
pub mod drivers;

mod esp_link_shims;

use config::ControllerConfig;
use drivers::{hw_init, hw_timer};

/// Check the build-time constants, configure the peripherals and start the
/// tick. Nothing touches hardware if the configuration is rejected.
pub fn bring_up(config: &ControllerConfig) -> error::Result<()> {
    config.validate()?;
    hw_init::init_peripherals()?;
    hw_timer::start_tick_timer(config.tick_period_ms)?;
    Ok(())
}
