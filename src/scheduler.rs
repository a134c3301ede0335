//! Light transition state machine.
//!
//! Two states, alternating forever:
//!
//! ```text
//!              next_off_after(now)
//!        ┌──────────────────────────────┐
//!        │                              ▼
//!      ┌─┴──┐                        ┌─────┐
//!      │ ON │                        │ OFF │
//!      └────┘                        └──┬──┘
//!        ▲                              │
//!        └──────────────────────────────┘
//!              next_on_after(now)
//! ```
//!
//! The scheduler is intentionally decoupled from the timer facility: each
//! operation performs its pin/log side effects and *returns* the wait in
//! seconds until the opposite transition. The caller (main loop) arms
//! exactly one new one-shot timer with that value — on every path,
//! including hardware faults, so a failed pin write degrades to a logged
//! event instead of stalling the schedule. This makes the state machine
//! independently testable with mock ports and a scripted clock.

use crate::clock::LocalInstant;
use crate::error::HardwareError;
use crate::ports::{EventSink, LightPin};
use crate::window::ScheduleWindow;

// ═══════════════════════════════════════════════════════════════
//  Output state and transition events
// ═══════════════════════════════════════════════════════════════

/// Commanded state of the light output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputState {
    On,
    Off,
}

/// Structured events emitted through the [`EventSink`] port.
///
/// Every transition carries the computed wait until the next one, so the
/// log line doubles as the schedule's observable heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    /// Initial state derived from wall-clock time at startup.
    Started { state: OutputState },

    /// The light was turned on; the OFF transition fires in `wait_secs`.
    TurnedOn { wait_secs: u64 },

    /// The light was turned off; the ON transition fires in `wait_secs`.
    TurnedOff { wait_secs: u64 },

    /// A pin operation failed. The state machine advanced anyway and the
    /// next transition is still scheduled in `wait_secs`.
    HardwareFault {
        error: HardwareError,
        wait_secs: u64,
    },
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler
// ═══════════════════════════════════════════════════════════════

/// The daily light scheduler.
///
/// Holds the immutable window and the current output state. There is no
/// persisted state: the state is re-derived from wall-clock time at every
/// startup, so the system self-heals across restarts.
pub struct LightScheduler {
    window: ScheduleWindow,
    state: OutputState,
}

impl LightScheduler {
    pub fn new(window: ScheduleWindow) -> Self {
        Self {
            window,
            // Placeholder until start() derives the real state.
            state: OutputState::Off,
        }
    }

    /// Initial evaluation at boot: derive the desired state from `now`,
    /// drive the pin to match, and return the wait in seconds until the
    /// first transition. Called exactly once.
    pub fn start(
        &mut self,
        now: LocalInstant,
        pin: &mut impl LightPin,
        sink: &mut impl EventSink,
    ) -> u64 {
        let state = if self.window.is_on_at(now) {
            OutputState::On
        } else {
            OutputState::Off
        };
        sink.emit(&TransitionEvent::Started { state });
        match state {
            OutputState::On => self.turn_on(now, pin, sink),
            OutputState::Off => self.turn_off(now, pin, sink),
        }
    }

    /// A pending transition timer fired: perform the opposite transition
    /// and return the wait until the next one.
    ///
    /// The caller must arm exactly one new one-shot timer with the returned
    /// value on every invocation — skipping it stalls the schedule
    /// permanently.
    pub fn on_transition_due(
        &mut self,
        now: LocalInstant,
        pin: &mut impl LightPin,
        sink: &mut impl EventSink,
    ) -> u64 {
        match self.state {
            OutputState::On => self.turn_off(now, pin, sink),
            OutputState::Off => self.turn_on(now, pin, sink),
        }
    }

    pub fn state(&self) -> OutputState {
        self.state
    }

    pub fn window(&self) -> &ScheduleWindow {
        &self.window
    }

    /// Assert the pin and schedule the OFF transition. The state advances
    /// even when the pin write fails, so transitions keep alternating and
    /// the next boundary retries the opposite action.
    fn turn_on(
        &mut self,
        now: LocalInstant,
        pin: &mut impl LightPin,
        sink: &mut impl EventSink,
    ) -> u64 {
        self.state = OutputState::On;
        let off_at = self.window.next_off_after(now);
        // next_off_after is strictly in the future, so the cast is safe.
        let wait_secs = now.seconds_until(off_at) as u64;
        match pin.assert() {
            Ok(()) => sink.emit(&TransitionEvent::TurnedOn { wait_secs }),
            Err(error) => sink.emit(&TransitionEvent::HardwareFault { error, wait_secs }),
        }
        wait_secs
    }

    fn turn_off(
        &mut self,
        now: LocalInstant,
        pin: &mut impl LightPin,
        sink: &mut impl EventSink,
    ) -> u64 {
        self.state = OutputState::Off;
        let on_at = self.window.next_on_after(now);
        let wait_secs = now.seconds_until(on_at) as u64;
        match pin.deassert() {
            Ok(()) => sink.emit(&TransitionEvent::TurnedOff { wait_secs }),
            Err(error) => sink.emit(&TransitionEvent::HardwareFault { error, wait_secs }),
        }
        wait_secs
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TimeOfDay;

    struct FakePin {
        asserted: bool,
        fail_next: bool,
        assert_calls: u32,
        deassert_calls: u32,
    }

    impl FakePin {
        fn new() -> Self {
            Self {
                asserted: false,
                fail_next: false,
                assert_calls: 0,
                deassert_calls: 0,
            }
        }
    }

    impl LightPin for FakePin {
        fn assert(&mut self) -> Result<(), HardwareError> {
            self.assert_calls += 1;
            if self.fail_next {
                self.fail_next = false;
                return Err(HardwareError::GpioWriteFailed(-1));
            }
            self.asserted = true;
            Ok(())
        }

        fn deassert(&mut self) -> Result<(), HardwareError> {
            self.deassert_calls += 1;
            if self.fail_next {
                self.fail_next = false;
                return Err(HardwareError::GpioConfigFailed(-1));
            }
            self.asserted = false;
            Ok(())
        }

        fn is_asserted(&self) -> bool {
            self.asserted
        }
    }

    struct RecordingSink {
        events: Vec<TransitionEvent>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self { events: Vec::new() }
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&mut self, event: &TransitionEvent) {
            self.events.push(*event);
        }
    }

    fn at(day: i64, tod: &str) -> LocalInstant {
        LocalInstant::at(day, TimeOfDay::parse(tod).unwrap())
    }

    fn scheduler(start: &str, end: &str) -> LightScheduler {
        LightScheduler::new(ScheduleWindow::parse(start, end).unwrap())
    }

    #[test]
    fn startup_inside_window_turns_on() {
        let mut sched = scheduler("08:00", "20:00");
        let mut pin = FakePin::new();
        let mut sink = RecordingSink::new();

        let wait = sched.start(at(0, "12:00"), &mut pin, &mut sink);

        assert_eq!(sched.state(), OutputState::On);
        assert!(pin.is_asserted());
        assert_eq!(wait, 8 * 3_600); // until today 20:00
        assert_eq!(
            sink.events,
            vec![
                TransitionEvent::Started {
                    state: OutputState::On
                },
                TransitionEvent::TurnedOn {
                    wait_secs: 8 * 3_600
                },
            ]
        );
    }

    #[test]
    fn startup_outside_window_turns_off() {
        let mut sched = scheduler("20:00", "08:00");
        let mut pin = FakePin::new();
        let mut sink = RecordingSink::new();

        // Overnight window at noon: OFF, next on at today 20:00.
        let wait = sched.start(at(0, "12:00"), &mut pin, &mut sink);

        assert_eq!(sched.state(), OutputState::Off);
        assert!(!pin.is_asserted());
        assert_eq!(wait, 8 * 3_600);
    }

    #[test]
    fn transitions_alternate() {
        let mut sched = scheduler("08:00", "20:00");
        let mut pin = FakePin::new();
        let mut sink = RecordingSink::new();

        let mut now = at(0, "12:00");
        let mut wait = sched.start(now, &mut pin, &mut sink);

        for _ in 0..6 {
            let before = sched.state();
            now = now.plus_secs(wait as u32);
            wait = sched.on_transition_due(now, &mut pin, &mut sink);
            assert_ne!(sched.state(), before, "same-kind transitions fired back-to-back");
            assert!(wait > 0);
        }
        // Three full ON/OFF days after the initial ON.
        assert_eq!(pin.assert_calls, 4);
        assert_eq!(pin.deassert_calls, 3);
    }

    #[test]
    fn hardware_fault_still_schedules_next_transition() {
        let mut sched = scheduler("08:00", "20:00");
        let mut pin = FakePin::new();
        let mut sink = RecordingSink::new();

        let mut now = at(0, "12:00");
        let wait = sched.start(now, &mut pin, &mut sink);

        // The OFF transition fails at the pin...
        pin.fail_next = true;
        now = now.plus_secs(wait as u32); // today 20:00
        let wait = sched.on_transition_due(now, &mut pin, &mut sink);

        assert_eq!(sched.state(), OutputState::Off);
        assert_eq!(wait, 12 * 3_600); // tomorrow 08:00 regardless
        assert!(matches!(
            sink.events.last(),
            Some(TransitionEvent::HardwareFault { wait_secs, .. }) if *wait_secs == 12 * 3_600
        ));

        // ...and the chain recovers at the next boundary.
        now = now.plus_secs(wait as u32);
        let wait = sched.on_transition_due(now, &mut pin, &mut sink);
        assert_eq!(sched.state(), OutputState::On);
        assert!(pin.is_asserted());
        assert_eq!(wait, 12 * 3_600);
        assert!(matches!(
            sink.events.last(),
            Some(TransitionEvent::TurnedOn { .. })
        ));
    }
}
