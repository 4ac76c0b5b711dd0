//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlertService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, the UART alert channel, event sinks)
//! implement these traits.  The [`AlertService`](super::service::AlertService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and the whole service runs under test with mock adapters.

use crate::error::{CommsError, SensorError};
use crate::hazard::{AlertKind, LedPattern};

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapters: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Rangefinder port.  One blocking ping/echo cycle per call.
pub trait DistancePort {
    /// Measure the distance to the nearest obstacle, in centimetres.
    ///
    /// Blocks for the duration of one ping/echo cycle.  Returns
    /// [`SensorError::EchoTimeout`] when no echo arrives within the
    /// platform timeout — the caller skips that sample.
    fn read_distance_cm(&mut self) -> Result<u16, SensorError>;

    /// Running average over the recent sample window, for telemetry.
    fn avg_distance_cm(&self) -> Option<u16>;
}

/// Accelerometer port.  Three blocking single-conversion ADC reads.
pub trait MotionPort {
    /// Read the three analog channels (X, Y, Z), raw ADC counts.
    fn read_motion_channels(&mut self) -> Result<[u16; 3], SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Drive the three hazard indicator LEDs.
    fn set_hazard_leds(&mut self, pattern: LedPattern);

    /// Set the buzzer output level.
    fn set_buzzer(&mut self, on: bool);

    /// Kill all actuators (LEDs, buzzer) — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Alert channel port (domain → status UART)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget status message channel.
///
/// Implementations map the [`AlertKind`] onto its fixed literal string and
/// write it unbuffered to the configured serial channel.  A full or
/// disconnected channel surfaces as [`CommsError::ChannelSaturated`], which
/// the service counts and logs — never fatal, no retry.
pub trait AlertPort {
    fn send(&mut self, kind: AlertKind) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, a future
/// BLE characteristic, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
