//! Piezo buzzer driver.
//!
//! A bare GPIO output; the audible frequency comes from the alarm state
//! machine toggling it, not from PWM.  Implements the `embedded-hal`
//! digital output traits so the pin can be handed to any HAL-generic
//! consumer.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the buzzer GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use crate::drivers::hw_init;
use crate::pins;

pub struct Buzzer {
    level: bool,
}

impl Buzzer {
    pub fn new() -> Self {
        Self { level: false }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(pins::BUZZER_GPIO, on);
        self.level = on;
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_on(&self) -> bool {
        self.level
    }
}

// The GPIO write cannot fail once the pin is configured.
impl ErrorType for Buzzer {
    type Error = Infallible;
}

impl OutputPin for Buzzer {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

impl StatefulOutputPin for Buzzer {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hal_pin_trait_tracks_the_driver_state() {
        let mut b = Buzzer::new();
        assert!(!b.is_on());

        b.set_high().unwrap();
        assert!(b.is_on());
        assert!(b.is_set_high().unwrap());

        b.set_low().unwrap();
        assert!(!b.is_on());
        assert!(b.is_set_low().unwrap());

        // Toggle comes from StatefulOutputPin's default method.
        b.toggle().unwrap();
        assert!(b.is_on());
    }
}
