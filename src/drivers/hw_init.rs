//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions, the indicator LEDC timer/channel and the
//! diagnostic UART using raw ESP-IDF sys calls. Called once from `main()`
//! before the control loop starts.
//!
//! The pin handles at the bottom ([`InputLine`], [`OutputLine`],
//! [`PwmChannel`]) wrap the register helpers in `embedded-hal` traits so the
//! drivers above them stay generic and testable on the host.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    UartInitFailed(i32),
    TimerFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::UartInitFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
            Self::TimerFailed(rc) => write!(f, "tick timer create/start failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_ledc()?;
        init_uart()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // Door reed switch needs the pull-up; the PIR drives its line push-pull
    // but an undriven line must still read as idle.
    let inputs = [
        (pins::DOOR_GPIO, gpio_pullup_t_GPIO_PULLUP_ENABLE, gpio_pulldown_t_GPIO_PULLDOWN_DISABLE),
        (pins::MOTION_GPIO, gpio_pullup_t_GPIO_PULLUP_DISABLE, gpio_pulldown_t_GPIO_PULLDOWN_ENABLE),
    ];

    for &(pin, pull_up_en, pull_down_en) in &inputs {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en,
            pull_down_en,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    }

    info!("hw_init: GPIO inputs configured (door={}, motion={})", pins::DOOR_GPIO, pins::MOTION_GPIO);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim::level(pin)
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::RELAY_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    unsafe { gpio_set_level(pins::RELAY_GPIO, 0) };

    // Keep the relay de-energised across light sleep.
    unsafe { gpio_hold_en(pins::RELAY_GPIO) };

    info!("hw_init: relay output configured (gpio={})", pins::RELAY_GPIO);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: the pin was configured in init_gpio_outputs(). Hold is lifted
    // for the write and restored so the level survives light sleep.
    unsafe {
        gpio_hold_dis(pin);
        gpio_set_level(pin, u32::from(high));
        gpio_hold_en(pin);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    sim::set_level(pin, high);
}

// ── LEDC PWM ─────────────────────────────────────────────────

pub const LEDC_CH_INDICATOR: u32 = 0;
/// 8-bit duty resolution.
pub const LEDC_MAX_DUTY: u16 = 255;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: pins::INDICATOR_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    let ret = unsafe { ledc_channel_config(&ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: LEDC_CH_INDICATOR,
        timer_sel: ledc_timer_t_LEDC_TIMER_0,
        gpio_num: pins::INDICATOR_GPIO,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    }) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    info!("hw_init: LEDC configured (indicator=CH{})", LEDC_CH_INDICATOR);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u16) {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only the main loop calls this function.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, u32::from(duty));
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(channel: u32, duty: u16) {
    sim::set_duty(channel, duty);
}

// ── Diagnostic UART ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
const UART_RX_BUF: i32 = 256;

#[cfg(target_os = "espidf")]
unsafe fn init_uart() -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: pins::DIAG_UART_BAUD,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    let port = pins::DIAG_UART_PORT;

    let ret = unsafe { uart_param_config(port, &cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    let ret = unsafe {
        uart_set_pin(port, pins::DIAG_UART_TX_GPIO, pins::DIAG_UART_RX_GPIO, -1, -1)
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    // No TX ring: writes go straight to the hardware FIFO via uart_tx_chars,
    // which never waits. SerialChannel keeps whatever the FIFO refuses.
    let ret = unsafe {
        uart_driver_install(port, UART_RX_BUF, 0, 0, core::ptr::null_mut(), 0)
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    info!("hw_init: diagnostic UART{} @ {} baud", port, pins::DIAG_UART_BAUD);
    Ok(())
}

/// Copy as many bytes as the TX FIFO has room for. Never blocks; returns
/// how many were accepted, possibly zero.
#[cfg(target_os = "espidf")]
pub fn uart_write(data: &[u8]) -> usize {
    let len = u32::try_from(data.len()).unwrap_or(u32::MAX);
    // SAFETY: driver installed in init_uart(); the buffer outlives the call.
    let n = unsafe { uart_tx_chars(pins::DIAG_UART_PORT, data.as_ptr().cast(), len) };
    n.max(0) as usize
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write(data: &[u8]) -> usize {
    sim::take_uart_room(data.len())
}

/// Non-blocking read of whatever the UART has buffered.
#[cfg(target_os = "espidf")]
pub fn uart_read(buf: &mut [u8]) -> usize {
    // SAFETY: driver installed in init_uart(); zero ticks to wait.
    let n = unsafe {
        uart_read_bytes(pins::DIAG_UART_PORT, buf.as_mut_ptr().cast(), buf.len() as u32, 0)
    };
    n.max(0) as usize
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_read(_buf: &mut [u8]) -> usize {
    0
}

// ── embedded-hal pin handles ─────────────────────────────────

/// A configured GPIO input.
#[derive(Debug, Clone, Copy)]
pub struct InputLine(pub i32);

impl ErrorType for InputLine {
    type Error = Infallible;
}

impl InputPin for InputLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(gpio_read(self.0))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!gpio_read(self.0))
    }
}

/// A configured GPIO output.
#[derive(Debug, Clone, Copy)]
pub struct OutputLine(pub i32);

impl ErrorType for OutputLine {
    type Error = Infallible;
}

impl OutputPin for OutputLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        gpio_write(self.0, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        gpio_write(self.0, true);
        Ok(())
    }
}

/// A configured LEDC channel.
#[derive(Debug, Clone, Copy)]
pub struct PwmChannel(pub u32);

impl pwm::ErrorType for PwmChannel {
    type Error = Infallible;
}

impl SetDutyCycle for PwmChannel {
    fn max_duty_cycle(&self) -> u16 {
        LEDC_MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        ledc_set(self.0, duty.min(LEDC_MAX_DUTY));
        Ok(())
    }
}

// ── Host simulation ──────────────────────────────────────────

/// In-memory register file standing in for GPIO and LEDC on the host.
#[cfg(not(target_os = "espidf"))]
pub mod sim {
    use core::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};

    const GPIO_COUNT: usize = 49;
    const LEDC_COUNT: usize = 8;

    static LEVELS: [AtomicBool; GPIO_COUNT] = [const { AtomicBool::new(false) }; GPIO_COUNT];
    static DUTIES: [AtomicU16; LEDC_COUNT] = [const { AtomicU16::new(0) }; LEDC_COUNT];
    /// Free bytes in the simulated TX FIFO.
    static UART_ROOM: AtomicUsize = AtomicUsize::new(usize::MAX);

    pub fn level(pin: i32) -> bool {
        usize::try_from(pin)
            .ok()
            .and_then(|i| LEVELS.get(i))
            .is_some_and(|l| l.load(Ordering::Acquire))
    }

    pub fn set_level(pin: i32, high: bool) {
        if let Some(l) = usize::try_from(pin).ok().and_then(|i| LEVELS.get(i)) {
            l.store(high, Ordering::Release);
        }
    }

    pub fn duty(channel: u32) -> u16 {
        DUTIES
            .get(channel as usize)
            .map_or(0, |d| d.load(Ordering::Acquire))
    }

    pub fn set_duty(channel: u32, duty: u16) {
        if let Some(d) = DUTIES.get(channel as usize) {
            d.store(duty, Ordering::Release);
        }
    }

    pub fn set_uart_room(bytes: usize) {
        UART_ROOM.store(bytes, Ordering::Release);
    }

    /// Claim up to `wanted` bytes of FIFO room, like `uart_tx_chars`.
    pub(super) fn take_uart_room(wanted: usize) -> usize {
        let mut taken = 0;
        let _ = UART_ROOM.fetch_update(Ordering::AcqRel, Ordering::Acquire, |room| {
            taken = wanted.min(room);
            Some(room - taken)
        });
        taken
    }
}
