//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to                 |
//! |------------|------------|-----------------------------|
//! | `gpio`     | LightPin   | ESP32 GPIO matrix           |
//! | `time`     | Clock      | `gettimeofday`/`localtime_r`|
//! | `log_sink` | EventSink  | Serial log output           |

pub mod gpio;
pub mod log_sink;
pub mod time;
