//! Unified error types for the nightlight firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level control loop's error handling uniform. All variants are `Copy`
//! so they can be passed through event sinks without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The schedule configuration is invalid. Fatal at construction —
    /// the system refuses to start rather than run an undefined window.
    Config(ConfigError),
    /// A GPIO operation failed at transition time. Reported, never fatal:
    /// the next transition timer is still armed.
    Hardware(HardwareError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Hardware(e) => write!(f, "hardware: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Rejected schedule configuration. Raised before any pin state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Time string is not exactly `HH:MM` with numeric components.
    MalformedTime,
    /// Hour component outside `0-23`.
    HourOutOfRange,
    /// Minute component outside `0-59`.
    MinuteOutOfRange,
    /// Start and end times are equal — a zero-length (or full-day) window
    /// has no defined ON region.
    EmptyWindow,
    /// The configured pin is not an addressable GPIO line.
    InvalidGpio,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTime => write!(f, "time must be HH:MM"),
            Self::HourOutOfRange => write!(f, "hour out of range (0-23)"),
            Self::MinuteOutOfRange => write!(f, "minute out of range (0-59)"),
            Self::EmptyWindow => write!(f, "window start and end are equal"),
            Self::InvalidGpio => write!(f, "invalid GPIO line"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Hardware errors
// ---------------------------------------------------------------------------

/// GPIO failures at transition time. The `i32` payload carries the ESP-IDF
/// return code for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// Switching the pin direction (output/input) failed.
    GpioConfigFailed(i32),
    /// Writing the pin level failed.
    GpioWriteFailed(i32),
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={rc})"),
            Self::GpioWriteFailed(rc) => write!(f, "GPIO write failed (rc={rc})"),
        }
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Self::Hardware(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
