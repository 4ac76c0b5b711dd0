//! Outbound application events.
//!
//! The [`AlertService`](super::service::AlertService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, feed a display, etc.

use crate::alarm::AlarmSeverity;
use crate::error::{CommsError, SensorError};
use crate::hazard::{AlertKind, HazardTier};

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started.
    Started,

    /// A distance sample was taken and classified.
    /// `tier` is `None` when the reading sat exactly on a tier boundary.
    DistanceSampled {
        cm: u16,
        tier: Option<HazardTier>,
    },

    /// The hazard tier changed between consecutive classified samples.
    TierChanged {
        from: Option<HazardTier>,
        to: HazardTier,
    },

    /// A status message was handed to the alert channel.
    AlertRaised(AlertKind),

    /// The alert channel refused a message (saturated / disconnected).
    AlertDropped(AlertKind, CommsError),

    /// The accelerometer sum crossed the fall threshold.
    FallDetected { sum: u32 },

    /// A sensor read failed; the sample was skipped.
    SensorFault(SensorError),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub last_distance_cm: u16,
    pub avg_distance_cm: Option<u16>,
    pub tier: Option<HazardTier>,
    pub alarm: Option<AlarmSeverity>,
    pub distance_samples: u64,
    pub motion_samples: u64,
    pub alerts_sent: u32,
    pub alerts_dropped: u32,
}
