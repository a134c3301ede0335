//! Timer-driven event queue.
//!
//! The one-shot transition timer fires in the ESP timer task context and
//! must not run scheduler logic there; it pushes an event into a lock-free
//! ring instead, and the main loop consumes it.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Transition timer │────▶│  Event Queue │────▶│  Main Loop   │
//! │ Shutdown request │────▶│  (lock-free) │     │  (consumer)  │
//! └──────────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! Single producer context (timer task / main loop), single consumer
//! (main loop), so atomic head/tail indices are all the synchronisation
//! needed.

use core::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of pending events. Power of 2 for cheap modulo; the
/// schedule only ever has one transition in flight, so this is generous.
const EVENT_QUEUE_CAP: usize = 8;

/// System event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// The pending transition timer expired — perform the opposite
    /// transition and arm the next timer.
    TransitionDue = 0,
    /// Clean-shutdown request: cancel the pending timer and exit the loop.
    Shutdown = 1,
}

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: EVENT_BUFFER is accessed under the SPSC discipline only —
// push_event (timer-task producer) writes slots the consumer has not yet
// reached, pop_event (main-loop consumer) reads slots the producer has
// published via the Release store on EVENT_HEAD.
static mut EVENT_BUFFER: [u8; EVENT_QUEUE_CAP] = [0; EVENT_QUEUE_CAP];

/// Push an event into the queue. Safe to call from the timer task
/// (lock-free). Returns `false` if the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    // SAFETY: single producer; this slot is not visible to the consumer
    // until the Release store below.
    unsafe {
        EVENT_BUFFER[head as usize] = event as u8;
    }

    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event. Called from the main loop (single consumer).
pub fn pop_event() -> Option<Event> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: single consumer; the producer published this slot before the
    // Release store on EVENT_HEAD that made it visible.
    let raw = unsafe { EVENT_BUFFER[tail as usize] };
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    event_from_u8(raw)
}

/// Drain all pending events into a callback, in FIFO order.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

/// Check if the event queue is empty.
pub fn queue_is_empty() -> bool {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);
    tail == head
}

// ── Internal ──────────────────────────────────────────────────

fn event_from_u8(raw: u8) -> Option<Event> {
    match raw {
        0 => Some(Event::TransitionDue),
        1 => Some(Event::Shutdown),
        _ => None,
    }
}
