//! Property tests for the scheduling core.
//!
//! Runs on host only — proptest is not available for ESP32 targets.

#![cfg(not(target_os = "espidf"))]

use nightlight::clock::{LocalInstant, TimeOfDay, SECS_PER_DAY};
use nightlight::window::ScheduleWindow;
use proptest::prelude::*;

fn arb_time_of_day() -> impl Strategy<Value = TimeOfDay> {
    (0u8..24, 0u8..60).prop_map(|(h, m)| TimeOfDay::new(h, m).unwrap())
}

/// Any valid window (start != end).
fn arb_window() -> impl Strategy<Value = ScheduleWindow> {
    (arb_time_of_day(), arb_time_of_day())
        .prop_filter("degenerate window", |(s, e)| s != e)
        .prop_map(|(s, e)| ScheduleWindow::new(s, e).unwrap())
}

fn arb_now() -> impl Strategy<Value = LocalInstant> {
    (0i64..3, 0u32..SECS_PER_DAY).prop_map(|(day, secs)| LocalInstant::new(day, secs))
}

proptest! {
    /// Both boundary helpers always return an instant strictly in the
    /// future, and never more than 24 hours ahead.
    #[test]
    fn boundaries_strictly_future_within_a_day(w in arb_window(), now in arb_now()) {
        for boundary in [w.next_on_after(now), w.next_off_after(now)] {
            let delta = now.seconds_until(boundary);
            prop_assert!(delta > 0, "boundary not strictly future: {delta}");
            prop_assert!(delta <= i64::from(SECS_PER_DAY), "boundary beyond 24h: {delta}");
        }
    }

    /// The state is ON immediately at the ON boundary and OFF immediately
    /// at the OFF boundary, for any window and reference instant.
    #[test]
    fn state_flips_at_the_boundaries(w in arb_window(), now in arb_now()) {
        prop_assert!(w.is_on_at(w.next_on_after(now)));
        prop_assert!(!w.is_on_at(w.next_off_after(now)));
    }

    /// `is_on_at` is a pure function of `now`: repeated evaluation with a
    /// frozen clock never changes the answer.
    #[test]
    fn is_on_is_pure(w in arb_window(), now in arb_now()) {
        let first = w.is_on_at(now);
        for _ in 0..3 {
            prop_assert_eq!(w.is_on_at(now), first);
        }
    }

    /// Starting from the ON boundary, the window stays ON right up to the
    /// OFF boundary and its length is (end - start) mod 24h.
    #[test]
    fn on_period_length_matches_window(w in arb_window(), now in arb_now()) {
        let on_at = w.next_on_after(now);
        let off_at = w.next_off_after(on_at);
        let length = on_at.seconds_until(off_at);

        let start = i64::from(w.start().secs_of_day());
        let end = i64::from(w.end().secs_of_day());
        let expected = (end - start).rem_euclid(i64::from(SECS_PER_DAY));
        prop_assert_eq!(length, expected);

        // Sample the interior of the ON period.
        let mid = on_at.plus_secs((length / 2) as u32);
        prop_assert!(w.is_on_at(mid));
    }

    /// Wraparound is defined by full (hour, minute) comparison, including
    /// windows whose boundaries share an hour.
    #[test]
    fn wraps_iff_start_after_end(w in arb_window()) {
        let start = w.start().secs_of_day();
        let end = w.end().secs_of_day();
        prop_assert_eq!(w.wraps_midnight(), start > end);
    }

    /// Parsing the zero-padded rendering of any valid time yields the
    /// original value.
    #[test]
    fn parse_format_round_trip(t in arb_time_of_day()) {
        let rendered = t.to_string();
        prop_assert_eq!(rendered.len(), 5);
        prop_assert_eq!(TimeOfDay::parse(&rendered).unwrap(), t);
    }
}
