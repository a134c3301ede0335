//! Nightlight firmware library.
//!
//! Exposes the pure scheduling core (clock, window, scheduler, ports) for
//! integration testing and external inspection. All ESP-IDF-specific code
//! is guarded by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod pins;
pub mod ports;
pub mod scheduler;
pub mod window;

// Hardware-facing modules; each carries a host-simulation fallback.
pub mod adapters;
pub mod drivers;
