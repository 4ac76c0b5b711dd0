//! Sensor subsystem — one driver per physical sensor.
//!
//! Each monitor loop owns its own driver; there is no shared sensor state
//! between the distance and motion paths.

pub mod motion;
pub mod ultrasonic;
