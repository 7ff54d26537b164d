//! Application core — pure domain logic, zero I/O.
//!
//! This module wires the garage light's control pieces together: debounced
//! sensors, the relay state machine, the indicator fader and the sleep
//! policy. All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod events;
pub mod ports;
pub mod service;
