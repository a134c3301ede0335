//! Port traits — the hexagonal boundary between the scheduling core and
//! the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ LightScheduler (domain)
//! ```
//!
//! Driven adapters (GPIO, system clock, log sink) implement these traits.
//! The [`LightScheduler`](crate::scheduler::LightScheduler) consumes them
//! via generics, so the scheduling core never touches hardware or the real
//! clock directly and runs unchanged in host-side tests.

use crate::clock::LocalInstant;
use crate::error::HardwareError;
use crate::scheduler::TransitionEvent;

// ───────────────────────────────────────────────────────────────
// Light pin port (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the single output line driving the light fixture.
///
/// Errors are typed and non-fatal — the scheduler reports them through the
/// [`EventSink`] and keeps the transition chain alive.
pub trait LightPin {
    /// Configure the line as a driven output and assert it (light ON).
    fn assert(&mut self) -> Result<(), HardwareError>;

    /// Release the line to its inactive state (light OFF).
    fn deassert(&mut self) -> Result<(), HardwareError>;

    /// Last commanded state, as tracked by the adapter.
    fn is_asserted(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Clock port (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: local wall-clock time.
pub trait Clock {
    /// Current local instant (calendar day + seconds-of-day).
    fn now(&self) -> LocalInstant;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The scheduler emits one structured [`TransitionEvent`] per transition
/// through this port. Adapters decide where they go (serial log today; an
/// MQTT or BLE adapter would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &TransitionEvent);
}
