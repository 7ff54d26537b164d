//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the ESP-IDF
//! logger (UART0 / USB-CDC console in production). The countdown is logged
//! at debug level only; it fires every second during cooldown.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | relay=off intensity=min");
            }
            AppEvent::RelayChanged { from, to } => {
                info!("RELAY | {} -> {}", from, to);
            }
            AppEvent::CooldownRemaining(secs) => {
                debug!("COOL  | {}s remaining", secs);
            }
            AppEvent::SleepRequested => {
                info!("POWER | light sleep requested");
            }
            AppEvent::Woke => {
                info!("POWER | woke on sensor edge");
            }
        }
    }
}
