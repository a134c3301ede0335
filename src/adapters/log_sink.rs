//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every transition event to the
//! serial log. A future MQTT or BLE adapter would implement the same
//! trait.

use log::{info, warn};

use crate::ports::EventSink;
use crate::scheduler::TransitionEvent;

/// Adapter that logs every [`TransitionEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &TransitionEvent) {
        match event {
            TransitionEvent::Started { state } => {
                info!("START | initial_state={:?}", state);
            }
            TransitionEvent::TurnedOn { wait_secs } => {
                info!("LIGHT | on | next_off_in={}s", wait_secs);
            }
            TransitionEvent::TurnedOff { wait_secs } => {
                info!("LIGHT | off | next_on_in={}s", wait_secs);
            }
            TransitionEvent::HardwareFault { error, wait_secs } => {
                warn!(
                    "FAULT | {} | schedule continues, next transition in {}s",
                    error, wait_secs
                );
            }
        }
    }
}
