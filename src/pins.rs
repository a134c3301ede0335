//! GPIO pin assignments for the nightlight controller board.
//!
//! Single source of truth — the default configuration references this
//! module rather than hard-coding pin numbers.

/// Digital output: gate of the light relay / SSR (active HIGH).
/// The line is driven as an output while the light is ON and released to
/// a high-impedance input while OFF, so the external pull-down keeps the
/// relay de-energised.
pub const LIGHT_GPIO: i32 = 4;

/// Highest addressable GPIO index on the ESP32-S3.
pub const GPIO_MAX: i32 = 48;
