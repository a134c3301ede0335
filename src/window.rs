//! Daily ON window and transition-boundary math.
//!
//! The window is the configured `start..end` period during which the light
//! is ON. When `end` is earlier than `start` the window wraps past midnight
//! (e.g. `20:00..08:00` means ON through the night).
//!
//! ```text
//!            start < end                     start > end (wraps)
//!   ├────────■■■■■■■■■■────────┤     ├■■■■■■──────────────■■■■■■┤
//!   00:00   08:00    20:00  24:00    00:00  08:00      20:00 24:00
//! ```
//!
//! Wraparound detection compares the full (hour, minute) pair, so a
//! same-hour window such as `13:50..13:10` is correctly treated as
//! crossing midnight.

use crate::clock::{LocalInstant, TimeOfDay};
use crate::error::ConfigError;

/// The configured daily ON window. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl ScheduleWindow {
    /// Build a window, rejecting the degenerate `start == end` case —
    /// a zero-length (or full-day) window has no defined ON region.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, ConfigError> {
        if start == end {
            return Err(ConfigError::EmptyWindow);
        }
        Ok(Self { start, end })
    }

    /// Parse both `"HH:MM"` boundary strings and build the window.
    pub fn parse(start: &str, end: &str) -> Result<Self, ConfigError> {
        Self::new(TimeOfDay::parse(start)?, TimeOfDay::parse(end)?)
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Whether the ON period crosses midnight. Full lexicographic
    /// comparison on (hour, minute).
    pub fn wraps_midnight(&self) -> bool {
        self.start > self.end
    }

    /// The next ON→OFF boundary strictly after `now`: today's `end` if it
    /// is still ahead, otherwise tomorrow's. Seconds are zero — boundaries
    /// land on whole minutes.
    pub fn next_off_after(&self, now: LocalInstant) -> LocalInstant {
        Self::next_occurrence(self.end, now)
    }

    /// The next OFF→ON boundary strictly after `now`.
    pub fn next_on_after(&self, now: LocalInstant) -> LocalInstant {
        Self::next_occurrence(self.start, now)
    }

    /// Whether the light should be ON at `now`.
    ///
    /// Pure function of `now` and the window: the nearer upcoming boundary
    /// decides the state. If the next boundary ahead is the OFF boundary we
    /// are inside the window; if it is the ON boundary we are outside. Both
    /// boundary helpers are wraparound-aware, so overnight windows are
    /// handled on both sides of midnight without a separate branch.
    pub fn is_on_at(&self, now: LocalInstant) -> bool {
        self.next_off_after(now) < self.next_on_after(now)
    }

    /// Next instant with time-of-day `tod` strictly after `now`.
    fn next_occurrence(tod: TimeOfDay, now: LocalInstant) -> LocalInstant {
        if now.secs_of_day() < tod.secs_of_day() {
            LocalInstant::at(now.day(), tod)
        } else {
            LocalInstant::at(now.day() + 1, tod)
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
