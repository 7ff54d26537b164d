//! Garage Light Firmware — Main Entry Point
//!
//! Hexagonal architecture around a tick-driven control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter     LightSleep    LogEventSink + SerialDiag.  │
//! │  (Sensor+Actuator)   (SleepPort)   (EventSink pair)            │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │          GarageController (pure logic)                 │    │
//! │  │  Debounce · Relay FSM · Fader · PowerManager           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                          ▲                                     │
//! │               TIME_BASE (esp_timer tick, 4 ms)                 │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{info, trace};

use garage_light::adapters::hardware::HardwareAdapter;
use garage_light::adapters::log_sink::LogEventSink;
use garage_light::adapters::serial::SerialChannel;
use garage_light::adapters::sleep::LightSleep;
use garage_light::app::service::GarageController;
use garage_light::config::GARAGE;
use garage_light::diagnostics::SerialDiagnostics;
use garage_light::drivers::hw_init::{self, InputLine, OutputLine, PwmChannel};
use garage_light::pins;
use garage_light::timebase::TIME_BASE;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Garage Light v{}                 ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration, peripherals and tick ────────────────
    let config = GARAGE;
    info!("Config: {}", serde_json::to_string(&config)?);
    garage_light::bring_up(&config)?;

    // ── 3. Hardware adapter ───────────────────────────────────
    let mut hw = HardwareAdapter::new(
        &config,
        InputLine(pins::DOOR_GPIO),
        InputLine(pins::MOTION_GPIO),
        OutputLine(pins::RELAY_GPIO),
        PwmChannel(hw_init::LEDC_CH_INDICATOR),
    );

    // ── 4. Adapters ───────────────────────────────────────────
    let mut sleep = LightSleep::new();
    let mut sink = (LogEventSink::new(), SerialDiagnostics::new(SerialChannel::new()));

    // ── 5. Controller ─────────────────────────────────────────
    let mut app = GarageController::new(&config);
    app.start(&mut hw, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    let mut rx_buf = [0u8; 16];
    loop {
        app.run_once(&mut hw, &TIME_BASE, &mut sleep, &mut sink);

        // Serial diagnostics: TX ring → UART, UART → RX ring.
        let serial = sink.1.channel_mut();
        serial.drain_tx(hw_init::uart_write);
        let n = hw_init::uart_read(&mut rx_buf);
        for &b in &rx_buf[..n] {
            serial.push_received(b);
        }
        // Nothing consumes serial input yet; trace it and keep the ring current.
        while let Some(b) = serial.dequeue_byte() {
            trace!("serial rx: {:#04x}", b);
        }

        FreeRtos::delay_ms(u32::from(config.tick_period_ms));
    }
}
