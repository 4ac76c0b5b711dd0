//! Hardware timer module using ESP-IDF's esp_timer API.
//!
//! Creates the two periodic sampling timers.  Each callback does exactly
//! one thing: post a coalesced wakeup to its monitor and return.  No
//! sensor I/O, no blocking calls, no allocation happens in the callbacks —
//! they execute in the ESP timer task context where blocking would stall
//! every other timer.
//!
//! On simulation targets the main loop drives the wakeups from a sleep
//! loop instead.

use crate::notify::{DISTANCE_WAKEUP, MOTION_WAKEUP};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut DISTANCE_TIMER: esp_timer_handle_t = core::ptr::null_mut();
#[cfg(target_os = "espidf")]
static mut MOTION_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn distance_tick_cb(_arg: *mut core::ffi::c_void) {
    DISTANCE_WAKEUP.notify_from_isr();
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn motion_tick_cb(_arg: *mut core::ffi::c_void) {
    MOTION_WAKEUP.notify_from_isr();
}

/// Start the two periodic sampling timers.
///
/// - `distance_period_us` — rangefinder cadence (500 ms in production)
/// - `motion_period_us` — accelerometer cadence (5 ms in production)
#[cfg(target_os = "espidf")]
pub fn start_timers(distance_period_us: u64, motion_period_us: u64) {
    // SAFETY: DISTANCE_TIMER and MOTION_TIMER are written here once at boot
    // from the single main-task context before any timer callbacks fire.
    // The callbacks themselves only post a coalesced wakeup.
    unsafe {
        let distance_args = esp_timer_create_args_t {
            callback: Some(distance_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"distance\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&distance_args, &raw mut DISTANCE_TIMER);
        if ret != ESP_OK {
            log::error!(
                "hw_timer: distance timer create failed (rc={}) — continuing without distance ticks",
                ret
            );
            return;
        }
        let ret = esp_timer_start_periodic(DISTANCE_TIMER, distance_period_us);
        if ret != ESP_OK {
            log::error!("hw_timer: distance timer start failed (rc={})", ret);
            return;
        }

        let motion_args = esp_timer_create_args_t {
            callback: Some(motion_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"motion\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&motion_args, &raw mut MOTION_TIMER);
        if ret != ESP_OK {
            log::error!(
                "hw_timer: motion timer create failed (rc={}) — continuing without motion ticks",
                ret
            );
            return;
        }
        let ret = esp_timer_start_periodic(MOTION_TIMER, motion_period_us);
        if ret != ESP_OK {
            log::error!("hw_timer: motion timer start failed (rc={})", ret);
            return;
        }

        info!(
            "hw_timer: distance@{}us + motion@{}us started",
            distance_period_us, motion_period_us
        );
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn start_timers(_distance_period_us: u64, _motion_period_us: u64) {
    log::info!("hw_timer(sim): timers not started (wakeups driven by sleep loop)");
    // Touch the statics so the sim path keeps the same linkage.
    let _ = (&DISTANCE_WAKEUP, &MOTION_WAKEUP);
}
