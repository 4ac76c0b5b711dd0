//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the two sensors and both actuator drivers, exposing them through
//! [`DistancePort`], [`MotionPort`] and [`ActuatorPort`].  This is the
//! only module besides `drivers/` that touches actual hardware.  On
//! non-espidf targets, the underlying drivers use cfg-gated simulation
//! stubs.

use crate::app::ports::{ActuatorPort, DistancePort, MotionPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::hazard_leds::HazardLeds;
use crate::error::SensorError;
use crate::hazard::LedPattern;
use crate::sensors::motion::MotionSensor;
use crate::sensors::ultrasonic::UltrasonicSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    rangefinder: UltrasonicSensor,
    accelerometer: MotionSensor,
    leds: HazardLeds,
    buzzer: Buzzer,
}

impl HardwareAdapter {
    pub fn new(
        rangefinder: UltrasonicSensor,
        accelerometer: MotionSensor,
        leds: HazardLeds,
        buzzer: Buzzer,
    ) -> Self {
        Self {
            rangefinder,
            accelerometer,
            leds,
            buzzer,
        }
    }
}

// ── Sensor port implementations ───────────────────────────────

impl DistancePort for HardwareAdapter {
    fn read_distance_cm(&mut self) -> Result<u16, SensorError> {
        self.rangefinder.read_distance_cm()
    }

    fn avg_distance_cm(&self) -> Option<u16> {
        self.rangefinder.avg_distance_cm()
    }
}

impl MotionPort for HardwareAdapter {
    fn read_motion_channels(&mut self) -> Result<[u16; 3], SensorError> {
        self.accelerometer.read().map(|r| r.channels)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_hazard_leds(&mut self, pattern: LedPattern) {
        self.leds.set(pattern);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn all_off(&mut self) {
        self.leds.all_off();
        self.buzzer.off();
    }
}
