//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements         | Connects to                  |
//! |-------------|--------------------|------------------------------|
//! | `hardware`  | SensorPort         | Door / motion GPIO inputs    |
//! |             | ActuatorPort       | Relay GPIO, indicator LEDC   |
//! | `sleep`     | SleepPort          | ESP-IDF light sleep + GPIO wake |
//! | `log_sink`  | EventSink          | Serial log output            |
//! | `serial`    | (used by `diagnostics`) | Diagnostic UART rings   |

pub mod hardware;
pub mod log_sink;
pub mod serial;
pub mod sleep;
