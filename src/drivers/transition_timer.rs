//! One-shot transition timer using ESP-IDF's esp_timer API.
//!
//! At most one transition is pending at any moment. Arming replaces the
//! previous deadline; the callback executes in the ESP timer task (not
//! ISR) context and only pushes [`Event::TransitionDue`] into the
//! lock-free queue — scheduler logic runs in the main loop.
//!
//! On simulation targets there is no timer task; [`poll`] is called from
//! the main loop's sleep tick and fires the deadline itself.

use crate::events::{push_event, Event};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut TRANSITION_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: TRANSITION_TIMER is written once in `init()` before any arm/stop
/// call. Only touched from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn transition_timer() -> esp_timer_handle_t {
    unsafe { TRANSITION_TIMER }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn transition_cb(_arg: *mut core::ffi::c_void) {
    push_event(Event::TransitionDue);
}

/// Create the one-shot timer. Called once from `main()` before the first
/// arm. Failure is loud: without this timer the schedule cannot run.
#[cfg(target_os = "espidf")]
pub fn init() -> Result<(), crate::error::Error> {
    // SAFETY: TRANSITION_TIMER is written here once at boot from the single
    // main-task context before any callback can fire.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(transition_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"transition\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut TRANSITION_TIMER);
        if ret != ESP_OK {
            log::error!("transition_timer: create failed (rc={})", ret);
            return Err(crate::error::Error::Init("esp_timer create failed"));
        }
    }
    info!("transition_timer: created");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init() -> Result<(), crate::error::Error> {
    log::info!("transition_timer(sim): deadline driven by main-loop poll");
    Ok(())
}

/// Arm the one-shot timer `delay_secs` from now, replacing any pending
/// deadline. This is called after *every* transition — the arm step must
/// never be skipped or the schedule stalls in its last state.
#[cfg(target_os = "espidf")]
pub fn arm(delay_secs: u64) {
    // SAFETY: transition_timer() contract — main task only; the handle is
    // valid if init() succeeded.
    unsafe {
        let handle = transition_timer();
        if handle.is_null() {
            log::error!("transition_timer: arm before init — schedule stalled");
            return;
        }
        // A fired one-shot is already stopped; rc is informational.
        esp_timer_stop(handle);
        let ret = esp_timer_start_once(handle, delay_secs.saturating_mul(1_000_000));
        if ret != ESP_OK {
            log::error!("transition_timer: start failed (rc={}) — schedule stalled", ret);
        }
    }
}

/// Cancel the pending deadline (clean shutdown).
#[cfg(target_os = "espidf")]
pub fn stop() {
    // SAFETY: same contract as arm().
    unsafe {
        let handle = transition_timer();
        if !handle.is_null() {
            esp_timer_stop(handle);
        }
    }
}

// ── Simulation fallback ───────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use std::sync::atomic::AtomicU64;
    use std::sync::OnceLock;
    use std::time::Instant;

    /// Deadline in microseconds since process start; `u64::MAX` = unarmed.
    pub(super) static DEADLINE_US: AtomicU64 = AtomicU64::new(u64::MAX);
    static START: OnceLock<Instant> = OnceLock::new();

    pub(super) fn now_us() -> u64 {
        START.get_or_init(Instant::now).elapsed().as_micros() as u64
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn arm(delay_secs: u64) {
    let deadline = sim::now_us().saturating_add(delay_secs.saturating_mul(1_000_000));
    sim::DEADLINE_US.store(deadline, std::sync::atomic::Ordering::Release);
}

#[cfg(not(target_os = "espidf"))]
pub fn stop() {
    sim::DEADLINE_US.store(u64::MAX, std::sync::atomic::Ordering::Release);
}

/// Fire the deadline if it has passed. Called from the simulation main
/// loop once per sleep tick; a no-op while unarmed.
#[cfg(not(target_os = "espidf"))]
pub fn poll() {
    use std::sync::atomic::Ordering;
    let deadline = sim::DEADLINE_US.load(Ordering::Acquire);
    if deadline != u64::MAX && sim::now_us() >= deadline {
        sim::DEADLINE_US.store(u64::MAX, Ordering::Release);
        push_event(Event::TransitionDue);
    }
}
