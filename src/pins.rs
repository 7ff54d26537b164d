//! GPIO / peripheral pin assignments for the garage light board.
//!
//! Single source of truth. Every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Reed switch on the door frame, internal pull-up.
/// LOW = door open (magnet away), HIGH = door closed.
pub const DOOR_GPIO: i32 = 4;
/// PIR motion sensor output. HIGH = motion.
pub const MOTION_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Relay coil driver (via transistor), active HIGH. Switches the lamp.
pub const RELAY_GPIO: i32 = 6;
/// Indicator LED, LEDC PWM.
pub const INDICATOR_GPIO: i32 = 7;
/// Indicator PWM carrier.
pub const INDICATOR_PWM_FREQ_HZ: u32 = 1_000;

// ---------------------------------------------------------------------------
// Diagnostic serial link (UART1, UART0 carries the log console)
// ---------------------------------------------------------------------------

pub const DIAG_UART_PORT: i32 = 1;
pub const DIAG_UART_TX_GPIO: i32 = 17;
pub const DIAG_UART_RX_GPIO: i32 = 18;
pub const DIAG_UART_BAUD: i32 = 115_200;
