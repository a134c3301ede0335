//! System configuration parameters.
//!
//! The entire configuration surface of the scheduler: one GPIO line and
//! the two daily window boundaries. Validated before any scheduling
//! begins; the system refuses to start on a malformed window.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pins;
use crate::window::ScheduleWindow;

/// Fixed-capacity holder for an `"HH:MM"` boundary string.
type TimeString = heapless::String<8>;

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightConfig {
    /// GPIO line driving the light fixture.
    pub light_gpio: i32,
    /// Daily turn-on time, `"HH:MM"`.
    pub on_at: TimeString,
    /// Daily turn-off time, `"HH:MM"`. May be earlier than `on_at`, in
    /// which case the ON window wraps past midnight.
    pub off_at: TimeString,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            light_gpio: pins::LIGHT_GPIO,
            on_at: time_string("17:30"),
            off_at: time_string("23:00"),
        }
    }
}

impl LightConfig {
    /// Parse both boundaries and build the schedule window.
    pub fn window(&self) -> Result<ScheduleWindow, ConfigError> {
        ScheduleWindow::parse(&self.on_at, &self.off_at)
    }

    /// Full validation: pin range and window boundaries. Runs before any
    /// pin state changes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=pins::GPIO_MAX).contains(&self.light_gpio) {
            return Err(ConfigError::InvalidGpio);
        }
        self.window()?;
        Ok(())
    }
}

fn time_string(s: &str) -> TimeString {
    let mut out = TimeString::new();
    // "HH:MM" always fits the fixed capacity.
    let _ = out.push_str(s);
    out
}
