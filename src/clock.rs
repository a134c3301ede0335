//! Wall-clock value types for the scheduling core.
//!
//! [`TimeOfDay`] is the parsed `"HH:MM"` configuration value; [`LocalInstant`]
//! pairs a local calendar day with seconds-of-day. The scheduling core works
//! exclusively on these types and never touches the system clock, so every
//! window calculation is testable with hand-built instants.

use core::fmt;

use crate::error::ConfigError;

/// Seconds in one calendar day.
pub const SECS_PER_DAY: u32 = 86_400;

// ───────────────────────────────────────────────────────────────
// Time of day
// ───────────────────────────────────────────────────────────────

/// A minute-resolution time of day. Immutable once parsed.
///
/// Ordering is lexicographic on (hour, minute), which is what the
/// wraparound check in [`ScheduleWindow`](crate::window::ScheduleWindow)
/// relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Build from components, rejecting out-of-range values.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ConfigError> {
        if hour > 23 {
            return Err(ConfigError::HourOutOfRange);
        }
        if minute > 59 {
            return Err(ConfigError::MinuteOutOfRange);
        }
        Ok(Self { hour, minute })
    }

    /// Parse exactly `"HH:MM"` — two digits, a colon, two digits.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let b = s.as_bytes();
        if b.len() != 5 || b[2] != b':' {
            return Err(ConfigError::MalformedTime);
        }
        let digit = |c: u8| {
            if c.is_ascii_digit() {
                Ok(c - b'0')
            } else {
                Err(ConfigError::MalformedTime)
            }
        };
        let hour = digit(b[0])? * 10 + digit(b[1])?;
        let minute = digit(b[3])? * 10 + digit(b[4])?;
        Self::new(hour, minute)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Seconds since local midnight. Always a whole minute.
    pub fn secs_of_day(&self) -> u32 {
        u32::from(self.hour) * 3_600 + u32::from(self.minute) * 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

// ───────────────────────────────────────────────────────────────
// Local instant
// ───────────────────────────────────────────────────────────────

/// A point in local wall-clock time: calendar day plus seconds-of-day.
///
/// The day number is an opaque local-day counter (the system clock adapter
/// derives it from the civil date); only ordering and differences matter
/// to the scheduling core. Derived ordering on (day, secs) is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocalInstant {
    day: i64,
    secs: u32,
}

impl LocalInstant {
    /// Build an instant, normalising seconds overflow into whole days.
    pub fn new(day: i64, secs: u32) -> Self {
        Self {
            day: day + i64::from(secs / SECS_PER_DAY),
            secs: secs % SECS_PER_DAY,
        }
    }

    /// The instant at `tod` on the given calendar day. Seconds below the
    /// minute are zero by construction — transition boundaries always
    /// land on whole minutes.
    pub fn at(day: i64, tod: TimeOfDay) -> Self {
        Self {
            day,
            secs: tod.secs_of_day(),
        }
    }

    pub fn day(&self) -> i64 {
        self.day
    }

    /// Seconds since local midnight, `0..86_400`.
    pub fn secs_of_day(&self) -> u32 {
        self.secs
    }

    /// Signed seconds from `self` to `later` (negative if `later` is past).
    pub fn seconds_until(&self, later: LocalInstant) -> i64 {
        (later.day - self.day) * i64::from(SECS_PER_DAY) + i64::from(later.secs)
            - i64::from(self.secs)
    }

    /// The instant `secs` seconds after `self`. Test and simulation helper.
    pub fn plus_secs(&self, secs: u32) -> Self {
        Self::new(self.day, self.secs + secs)
    }
}

impl fmt::Display for LocalInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day {} {:02}:{:02}:{:02}",
            self.day,
            self.secs / 3_600,
            (self.secs / 60) % 60,
            self.secs % 60
        )
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_times() {
        let t = TimeOfDay::parse("08:30").unwrap();
        assert_eq!(t.hour(), 8);
        assert_eq!(t.minute(), 30);
        assert_eq!(TimeOfDay::parse("00:00").unwrap().secs_of_day(), 0);
        assert_eq!(TimeOfDay::parse("23:59").unwrap().secs_of_day(), 86_340);
    }

    #[test]
    fn rejects_malformed_times() {
        assert_eq!(TimeOfDay::parse("8:00"), Err(ConfigError::MalformedTime));
        assert_eq!(TimeOfDay::parse("08-00"), Err(ConfigError::MalformedTime));
        assert_eq!(TimeOfDay::parse("ab:cd"), Err(ConfigError::MalformedTime));
        assert_eq!(TimeOfDay::parse("08:000"), Err(ConfigError::MalformedTime));
        assert_eq!(TimeOfDay::parse(""), Err(ConfigError::MalformedTime));
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert_eq!(TimeOfDay::parse("25:00"), Err(ConfigError::HourOutOfRange));
        assert_eq!(TimeOfDay::parse("24:00"), Err(ConfigError::HourOutOfRange));
        assert_eq!(
            TimeOfDay::parse("08:60"),
            Err(ConfigError::MinuteOutOfRange)
        );
    }

    #[test]
    fn display_round_trips_zero_padded() {
        for s in ["00:00", "07:05", "23:59", "12:00"] {
            let t = TimeOfDay::parse(s).unwrap();
            assert_eq!(t.to_string(), s);
        }
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = TimeOfDay::parse("13:10").unwrap();
        let b = TimeOfDay::parse("13:50").unwrap();
        let c = TimeOfDay::parse("14:00").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn instant_ordering_and_difference() {
        let start = TimeOfDay::parse("20:00").unwrap();
        let end = TimeOfDay::parse("08:00").unwrap();
        let evening = LocalInstant::at(0, start);
        let morning = LocalInstant::at(1, end);
        assert!(evening < morning);
        assert_eq!(evening.seconds_until(morning), 12 * 3_600);
        assert_eq!(morning.seconds_until(evening), -12 * 3_600);
    }

    #[test]
    fn instant_normalises_day_overflow() {
        let i = LocalInstant::new(2, SECS_PER_DAY + 90);
        assert_eq!(i.day(), 3);
        assert_eq!(i.secs_of_day(), 90);
        assert_eq!(LocalInstant::new(0, 0).plus_secs(2 * SECS_PER_DAY).day(), 2);
    }
}
