//! System clock adapter.
//!
//! Implements the [`Clock`] port by decomposing the system wall clock into
//! a [`LocalInstant`] (local calendar day + seconds-of-day).
//!
//! - **`target_os = "espidf"`** — `gettimeofday()` + `localtime_r()` from
//!   newlib, honouring the configured `TZ`; day numbering comes from the
//!   civil date so it rolls over exactly at local midnight.
//! - **`not(target_os = "espidf")`** — `std::time::SystemTime` in UTC, for
//!   host-side simulation (tests use a scripted clock instead).

use crate::clock::{LocalInstant, SECS_PER_DAY};
use crate::ports::Clock;

/// Seconds since epoch at 2020-01-01; anything earlier means the wall
/// clock has not been set (e.g. pre-NTP sync after a cold boot).
pub const EPOCH_2020: i64 = 1_577_836_800;

/// Days from 1970-01-01 to the given civil date (proleptic Gregorian).
pub fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // [0, 399]
    let mp = i64::from((month + 9) % 12); // March-based month index
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * 146_097 + doe - 719_468
}

/// Clock adapter over the platform wall clock.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }

    /// Whether the wall clock looks NTP-synced. An unsynced clock still
    /// schedules (state is re-derived at every transition), but the window
    /// is offset until sync.
    #[cfg(target_os = "espidf")]
    pub fn is_synced(&self) -> bool {
        raw_epoch_secs().map_or(false, |s| s >= EPOCH_2020)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn is_synced(&self) -> bool {
        true
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "espidf")]
fn raw_epoch_secs() -> Option<i64> {
    use core::ptr;
    let mut tv = esp_idf_svc::sys::timeval {
        tv_sec: 0,
        tv_usec: 0,
    };
    // SAFETY: plain libc call writing into a local timeval.
    if unsafe { esp_idf_svc::sys::gettimeofday(&mut tv, ptr::null_mut()) } != 0 {
        return None;
    }
    Some(tv.tv_sec as i64)
}

#[cfg(target_os = "espidf")]
impl Clock for SystemClock {
    fn now(&self) -> LocalInstant {
        let epoch = raw_epoch_secs().unwrap_or(0);

        let secs = epoch as esp_idf_svc::sys::time_t;
        // SAFETY: localtime_r writes into the local tm and returns null on
        // failure, which we check before reading the fields.
        let mut tm: esp_idf_svc::sys::tm = unsafe { core::mem::zeroed() };
        if unsafe { esp_idf_svc::sys::localtime_r(&secs, &mut tm) }.is_null() {
            // Timezone database unavailable — fall back to UTC decomposition.
            let day = epoch.div_euclid(i64::from(SECS_PER_DAY));
            let rem = epoch.rem_euclid(i64::from(SECS_PER_DAY)) as u32;
            return LocalInstant::new(day, rem);
        }

        let day = days_from_civil(tm.tm_year + 1900, (tm.tm_mon + 1) as u32, tm.tm_mday as u32);
        let secs_of_day =
            (tm.tm_hour as u32) * 3_600 + (tm.tm_min as u32) * 60 + (tm.tm_sec as u32).min(59);
        LocalInstant::new(day, secs_of_day)
    }
}

#[cfg(not(target_os = "espidf"))]
impl Clock for SystemClock {
    fn now(&self) -> LocalInstant {
        let epoch = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        let day = epoch.div_euclid(i64::from(SECS_PER_DAY));
        let rem = epoch.rem_euclid(i64::from(SECS_PER_DAY)) as u32;
        LocalInstant::new(day, rem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_from_civil_matches_known_dates() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(1970, 1, 2), 1);
        assert_eq!(days_from_civil(1969, 12, 31), -1);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
        // 2020-01-01 = EPOCH_2020 / 86400.
        assert_eq!(days_from_civil(2020, 1, 1), EPOCH_2020 / 86_400);
    }

    #[test]
    fn days_from_civil_handles_leap_years() {
        assert_eq!(
            days_from_civil(2024, 2, 29) + 1,
            days_from_civil(2024, 3, 1)
        );
        assert_eq!(
            days_from_civil(2023, 2, 28) + 1,
            days_from_civil(2023, 3, 1)
        );
    }

    #[cfg(not(target_os = "espidf"))]
    #[test]
    fn system_clock_is_monotonic_within_a_call_pair() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a <= b);
        assert!(clock.is_synced());
    }
}
