//! Hardware drivers — peripheral bring-up, timers, and actuator outputs.

pub mod buzzer;
pub mod hazard_leds;
pub mod hw_init;
pub mod hw_timer;
