//! Hazard indicator LED bank driver.
//!
//! Three discrete LEDs on the handlebar unit, lit cumulatively with
//! severity: LED1 in every tier, LED2 from Caution, LED3 only in Danger.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three GPIO outputs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::hazard::LedPattern;
use crate::pins;

pub struct HazardLeds {
    current: LedPattern,
}

impl HazardLeds {
    pub fn new() -> Self {
        Self {
            current: LedPattern::ALL_OFF,
        }
    }

    pub fn set(&mut self, pattern: LedPattern) {
        hw_init::gpio_write(pins::LED_1_GPIO, pattern.led1);
        hw_init::gpio_write(pins::LED_2_GPIO, pattern.led2);
        hw_init::gpio_write(pins::LED_3_GPIO, pattern.led3);
        self.current = pattern;
    }

    pub fn all_off(&mut self) {
        self.set(LedPattern::ALL_OFF);
    }

    pub fn current(&self) -> LedPattern {
        self.current
    }
}
