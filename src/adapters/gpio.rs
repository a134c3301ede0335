//! GPIO light pin adapter.
//!
//! Implements [`LightPin`] on the output line driving the light fixture.
//! ON drives the line as an output asserted HIGH; OFF releases it back to
//! a high-impedance input, letting the external pull-down de-energise the
//! relay. Direction is reconfigured on every transition, so the line is
//! never left driven across an OFF period.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: raw `gpio_set_direction` / `gpio_set_level` sys calls.
//! On host/test: tracks state in-memory only.

use crate::error::HardwareError;
use crate::ports::LightPin;

/// The single controlled output line.
pub struct GpioLightPin {
    gpio: i32,
    asserted: bool,
}

impl GpioLightPin {
    /// Wrap the given GPIO line. No pin state changes until the first
    /// transition.
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            asserted: false,
        }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

#[cfg(target_os = "espidf")]
impl LightPin for GpioLightPin {
    fn assert(&mut self) -> Result<(), HardwareError> {
        use esp_idf_svc::sys::*;

        // SAFETY: raw ESP-IDF GPIO calls on a line this adapter owns;
        // invoked only from the single main-loop task.
        unsafe {
            let rc = gpio_set_direction(self.gpio, gpio_mode_t_GPIO_MODE_OUTPUT);
            if rc != ESP_OK {
                return Err(HardwareError::GpioConfigFailed(rc));
            }
            let rc = gpio_set_level(self.gpio, 1);
            if rc != ESP_OK {
                return Err(HardwareError::GpioWriteFailed(rc));
            }
        }
        self.asserted = true;
        Ok(())
    }

    fn deassert(&mut self) -> Result<(), HardwareError> {
        use esp_idf_svc::sys::*;

        // SAFETY: same single-task ownership as assert().
        unsafe {
            let rc = gpio_set_level(self.gpio, 0);
            if rc != ESP_OK {
                return Err(HardwareError::GpioWriteFailed(rc));
            }
            let rc = gpio_set_direction(self.gpio, gpio_mode_t_GPIO_MODE_INPUT);
            if rc != ESP_OK {
                return Err(HardwareError::GpioConfigFailed(rc));
            }
        }
        self.asserted = false;
        Ok(())
    }

    fn is_asserted(&self) -> bool {
        self.asserted
    }
}

#[cfg(not(target_os = "espidf"))]
impl LightPin for GpioLightPin {
    fn assert(&mut self) -> Result<(), HardwareError> {
        log::debug!("gpio(sim): pin {} → output HIGH", self.gpio);
        self.asserted = true;
        Ok(())
    }

    fn deassert(&mut self) -> Result<(), HardwareError> {
        log::debug!("gpio(sim): pin {} → input (released)", self.gpio);
        self.asserted = false;
        Ok(())
    }

    fn is_asserted(&self) -> bool {
        self.asserted
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn sim_pin_tracks_commanded_state() {
        let mut pin = GpioLightPin::new(4);
        assert!(!pin.is_asserted());
        pin.assert().unwrap();
        assert!(pin.is_asserted());
        pin.deassert().unwrap();
        assert!(!pin.is_asserted());
    }
}
