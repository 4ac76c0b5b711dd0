//! 3-axis analog accelerometer driver.
//!
//! The helmet-mounted accelerometer exposes one analog voltage per axis;
//! each read is a blocking single-shot ADC conversion.  The three raw
//! counts are returned together and consumed immediately by the motion
//! monitor — no retention, no filtering at this layer.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 channels via the oneshot API (initialised by
//! hw_init).  On host/test: reads from static `AtomicU16`s for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::error::SensorError;

#[cfg(not(target_os = "espidf"))]
static SIM_ACCEL_ADC: [AtomicU16; 3] = [
    AtomicU16::new(0),
    AtomicU16::new(0),
    AtomicU16::new(0),
];

/// Inject a raw ADC count for axis 0..=2.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_accel_adc(axis: usize, raw: u16) {
    SIM_ACCEL_ADC[axis].store(raw, Ordering::Relaxed);
}

/// One frame of raw accelerometer counts (X, Y, Z).
#[derive(Debug, Clone, Copy)]
pub struct MotionReading {
    pub channels: [u16; 3],
}

impl MotionReading {
    /// Channel sum in u32 — three 12-bit counts can overflow u16.
    pub fn sum(&self) -> u32 {
        self.channels.iter().map(|&c| u32::from(c)).sum()
    }
}

pub struct MotionSensor {
    adc_channels: [u32; 3],
}

impl MotionSensor {
    pub fn new(adc_channels: [u32; 3]) -> Self {
        Self { adc_channels }
    }

    /// Read all three axes, one blocking conversion each.
    pub fn read(&mut self) -> Result<MotionReading, SensorError> {
        let mut channels = [0u16; 3];
        for (i, &ch) in self.adc_channels.iter().enumerate() {
            channels[i] = self.read_axis(i, ch)?;
        }
        Ok(MotionReading { channels })
    }

    #[cfg(target_os = "espidf")]
    fn read_axis(&self, _axis: usize, ch: u32) -> Result<u16, SensorError> {
        crate::drivers::hw_init::adc1_read(ch).ok_or(SensorError::AdcReadFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_axis(&self, axis: usize, _ch: u32) -> Result<u16, SensorError> {
        Ok(SIM_ACCEL_ADC[axis].load(Ordering::Relaxed))
    }
}
