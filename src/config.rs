//! Controller tuning constants.
//!
//! Every threshold is fixed at build time; there is no runtime policy.
//! [`GARAGE`] is the shipped configuration and [`ControllerConfig::validate`]
//! must accept it once at boot, before the time base or the fader use it.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The configuration the firmware is built with.
pub const GARAGE: ControllerConfig = ControllerConfig::garage();

/// Timing, fade and input-polarity constants for one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Time base ---
    /// Hardware tick period in milliseconds.
    pub tick_period_ms: u16,
    /// Ticks per one-second pulse.
    pub ticks_per_second: u16,
    /// Seconds per minute pulse.
    pub seconds_per_minute: u8,
    /// Minutes with both sensors clear before the relay drops out.
    pub cooldown_minutes: u8,

    // --- Indicator fade ---
    /// Ticks between two fader steps (5 × 4 ms = 20 ms).
    pub fade_interval_ticks: u8,
    /// Intensity change per fade tick.
    pub fade_step: u8,
    /// Lowest indicator intensity.
    pub intensity_min: u8,
    /// Highest indicator intensity; also the PWM full-scale value.
    pub intensity_max: u8,

    // --- Inputs ---
    /// Reed switch with pull-up: the line reads low while the door is open.
    pub door_active_low: bool,
    /// PIR output polarity.
    pub motion_active_low: bool,

    // --- Power ---
    /// Allow light sleep once the light has gone out after a real activation.
    pub sleep_enabled: bool,
}

impl ControllerConfig {
    pub const fn garage() -> Self {
        Self {
            tick_period_ms: 4,
            ticks_per_second: 250,
            seconds_per_minute: 60,
            cooldown_minutes: 15,

            fade_interval_ticks: 5,
            fade_step: 4,
            intensity_min: 0,
            intensity_max: 200,

            door_active_low: true,
            motion_active_low: false,

            sleep_enabled: true,
        }
    }

    /// Reject constants that would leave the controller undefined.
    ///
    /// A zero cooldown would latch the relay on forever; a zero modulus would
    /// never roll over; a fade step wider than the intensity range would jump
    /// straight between the bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if u32::from(self.tick_period_ms) * u32::from(self.ticks_per_second) != 1000 {
            return Err(ConfigError::TickRateMismatch {
                tick_period_ms: self.tick_period_ms,
                ticks_per_second: self.ticks_per_second,
            });
        }
        if self.seconds_per_minute == 0 {
            return Err(ConfigError::ZeroSecondsPerMinute);
        }
        if self.cooldown_minutes == 0 {
            return Err(ConfigError::ZeroCooldown);
        }
        if self.fade_interval_ticks == 0 {
            return Err(ConfigError::ZeroFadeInterval);
        }
        if self.intensity_min >= self.intensity_max {
            return Err(ConfigError::EmptyIntensityRange {
                min: self.intensity_min,
                max: self.intensity_max,
            });
        }
        if self.fade_step == 0 {
            return Err(ConfigError::ZeroFadeStep);
        }
        if self.fade_step > self.intensity_max - self.intensity_min {
            return Err(ConfigError::FadeStepTooWide(self.fade_step));
        }
        Ok(())
    }

    /// Length of the cooldown window in seconds.
    pub const fn cooldown_secs(&self) -> u32 {
        self.cooldown_minutes as u32 * self.seconds_per_minute as u32
    }

    /// Length of the cooldown window in hardware ticks.
    pub const fn ticks_per_cooldown(&self) -> u32 {
        self.cooldown_secs() * self.ticks_per_second as u32
    }

    /// Level each input idles at when its sensor is not asserted.
    pub const fn door_idle_level(&self) -> bool {
        self.door_active_low
    }

    pub const fn motion_idle_level(&self) -> bool {
        self.motion_active_low
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::garage()
    }
}
