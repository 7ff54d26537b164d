//! Hardware tick timer using ESP-IDF's esp_timer API.
//!
//! One periodic timer at `tick_period_ms` drives
//! [`TIME_BASE`](crate::timebase::TIME_BASE). The
//! callback runs in the ESP timer task (not a raw ISR) and only advances
//! the shared counters; it never logs and never touches the control logic.
//!
//! `skip_unhandled_events` is set, so periods that fall inside light sleep
//! are dropped instead of being replayed as a burst on wake-up.

use crate::drivers::hw_init::HwInitError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: TICK_TIMER is written once in `start_tick_timer()` before any
/// timer callbacks fire.  Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn tick_timer() -> esp_timer_handle_t { unsafe { TICK_TIMER } }

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(_arg: *mut core::ffi::c_void) {
    crate::timebase::TIME_BASE.on_tick();
}

/// Start the periodic tick timer.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer(period_ms: u16) -> Result<(), HwInitError> {
    // SAFETY: TICK_TIMER is written here once at boot from the single
    // main-task context before the callback can fire.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"tick".as_ptr(),
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TimerFailed(ret));
        }
        let ret = esp_timer_start_periodic(tick_timer(), u64::from(period_ms) * 1_000);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TimerFailed(ret));
        }
    }

    info!("hw_timer: tick @ {}ms started", period_ms);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer(period_ms: u16) -> Result<(), HwInitError> {
    log::info!("hw_timer(sim): tick @ {}ms not started (drive TIME_BASE directly)", period_ms);
    Ok(())
}
