//! Serial countdown diagnostics.
//!
//! While the lamp is in cooldown the controller reports the seconds left
//! once per second. [`SerialDiagnostics`] turns those reports (and a few
//! state lines) into text on the diagnostic UART:
//!
//! ```text
//!   873\n\r
//!   872\n\r
//!   ...
//! ```
//!
//! Output goes into the bounded [`SerialChannel`]. Bytes that do not fit
//! are dropped; the control loop never waits on the UART.

use core::fmt::Write as _;

use heapless::String;

use crate::adapters::serial::SerialChannel;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Longest line this sink formats.
const LINE_CAPACITY: usize = 16;

/// [`EventSink`] writing countdown and state lines to a [`SerialChannel`].
#[derive(Debug, Default)]
pub struct SerialDiagnostics {
    channel: SerialChannel,
}

impl SerialDiagnostics {
    pub fn new(channel: SerialChannel) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &SerialChannel {
        &self.channel
    }

    /// The main loop pumps TX and feeds RX through this.
    pub fn channel_mut(&mut self) -> &mut SerialChannel {
        &mut self.channel
    }

    fn format(event: &AppEvent) -> Option<String<LINE_CAPACITY>> {
        let mut line = String::new();
        let written = match event {
            AppEvent::CooldownRemaining(secs) => write!(line, "{secs}\n\r"),
            AppEvent::RelayChanged { to, .. } => write!(line, "relay {to}\n\r"),
            AppEvent::Started => write!(line, "start\n\r"),
            AppEvent::SleepRequested => write!(line, "sleep\n\r"),
            AppEvent::Woke => write!(line, "wake\n\r"),
        };
        written.ok().map(|()| line)
    }
}

impl EventSink for SerialDiagnostics {
    fn emit(&mut self, event: &AppEvent) {
        if let Some(line) = Self::format(event) {
            self.channel.enqueue_bytes(line.as_bytes());
        }
    }
}
