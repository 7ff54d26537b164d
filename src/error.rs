//! Error types for the garage light firmware.
//!
//! The control core has no fallible runtime path: sensor reads are total,
//! every counter has a defined wrap or clamp, and a lost diagnostic byte is
//! silently dropped. Errors only exist at the edges, where a bad build-time
//! constant or a failed peripheral bring-up must stop the firmware before the
//! main loop starts.

use core::fmt;

pub use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every startup failure funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A build-time constant failed validation.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// A constant in [`ControllerConfig`](crate::config::ControllerConfig) that
/// cannot drive the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `tick_period_ms * ticks_per_second` is not one second.
    TickRateMismatch {
        tick_period_ms: u16,
        ticks_per_second: u16,
    },
    ZeroSecondsPerMinute,
    /// The relay would never be released.
    ZeroCooldown,
    ZeroFadeInterval,
    ZeroFadeStep,
    /// The step jumps over the whole intensity range.
    FadeStepTooWide(u8),
    EmptyIntensityRange { min: u8, max: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TickRateMismatch {
                tick_period_ms,
                ticks_per_second,
            } => write!(
                f,
                "{tick_period_ms} ms x {ticks_per_second} ticks is not one second"
            ),
            Self::ZeroSecondsPerMinute => write!(f, "seconds per minute is zero"),
            Self::ZeroCooldown => write!(f, "cooldown of zero minutes"),
            Self::ZeroFadeInterval => write!(f, "fade interval of zero ticks"),
            Self::ZeroFadeStep => write!(f, "fade step is zero"),
            Self::FadeStepTooWide(step) => {
                write!(f, "fade step {step} is wider than the intensity range")
            }
            Self::EmptyIntensityRange { min, max } => {
                write!(f, "intensity range {min}..={max} is empty")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
