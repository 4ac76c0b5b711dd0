//! System configuration parameters
//!
//! All tunable parameters for the BikeAlert system.  The tier boundaries and
//! the fall-detection threshold live here rather than inline in the monitor
//! code so field calibration is a one-line change.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Hazard tiers ---
    /// Distances strictly above this (cm) classify as Safe.
    pub safe_distance_cm: u16,
    /// Distances strictly below this (cm) classify as Danger.
    pub danger_distance_cm: u16,

    // --- Fall detection ---
    /// Accelerometer channel sum above which a fall is reported.
    ///
    /// The production value of 4 predates calibration on the real helmet
    /// mount and is almost certainly too low; treat it as a placeholder
    /// until the calibration rig produces a proper figure.
    pub fall_sum_threshold: u32,

    // --- Alarm ---
    /// Buzzer toggle interval for the Caution tier (ms) — 1 Hz square wave.
    pub caution_toggle_interval_ms: u32,
    /// Buzzer toggle interval for the Danger tier (ms) — 2 Hz square wave.
    pub danger_toggle_interval_ms: u32,

    // --- Sampling cadence ---
    /// Rangefinder sampling period (µs).
    pub distance_sample_period_us: u64,
    /// Accelerometer sampling period (µs).  The sensor refreshes roughly
    /// every 10 ms; sampling at twice that rate avoids missing a frame.
    pub motion_sample_period_us: u64,

    // --- Status channel ---
    /// Baud rate of the status UART.
    pub status_baud_rate: u32,
    /// Telemetry report interval (seconds).
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Hazard tiers
            safe_distance_cm: 500,
            danger_distance_cm: 300,

            // Fall detection
            fall_sum_threshold: 4,

            // Alarm
            caution_toggle_interval_ms: 1000,
            danger_toggle_interval_ms: 500,

            // Sampling cadence
            distance_sample_period_us: 500_000, // 2 Hz
            motion_sample_period_us: 5_000,     // 200 Hz

            // Status channel
            status_baud_rate: 115_200,
            telemetry_interval_secs: 60,
        }
    }
}

impl SystemConfig {
    /// Reject configurations the monitor loops cannot run on.  Called once
    /// at boot before any peripheral is touched.
    pub fn validate(&self) -> Result<()> {
        if self.danger_distance_cm >= self.safe_distance_cm {
            return Err(Error::Config(
                "danger boundary must sit below the safe boundary",
            ));
        }
        if self.distance_sample_period_us == 0 || self.motion_sample_period_us == 0 {
            return Err(Error::Config("sampling periods must be non-zero"));
        }
        if self.caution_toggle_interval_ms == 0 || self.danger_toggle_interval_ms == 0 {
            return Err(Error::Config("alarm toggle intervals must be non-zero"));
        }
        if self.status_baud_rate == 0 {
            return Err(Error::Config("status baud rate must be non-zero"));
        }
        Ok(())
    }
}
