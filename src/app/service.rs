//! Application service — the hexagonal core.
//!
//! [`AlertService`] owns the hazard state, the last distance sample, and
//! the alarm state machine.  It exposes one entry point per wakeup source
//! plus an alarm tick; all I/O flows through port traits injected at call
//! sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  DistancePort ──▶ ┌──────────────────────────┐ ──▶ AlertPort (UART)
//!  MotionPort  ──▶  │       AlertService        │ ──▶ EventSink (log)
//!                   │  classify · alarm · count │
//!  ActuatorPort ◀── └──────────────────────────┘
//! ```

use log::{info, warn};

use crate::alarm::{AlarmDriver, AlarmSeverity};
use crate::config::SystemConfig;
use crate::hazard::{self, AlertKind, HazardTier};

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, AlertPort, DistancePort, EventSink, MotionPort};

// ───────────────────────────────────────────────────────────────
// AlertService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AlertService {
    config: SystemConfig,
    alarm: AlarmDriver,
    /// Most recent classified tier.  `None` until the first sample that
    /// lands off a boundary.
    tier: Option<HazardTier>,
    /// Most recent raw distance sample (cm), boundary readings included.
    last_distance_cm: u16,
    distance_samples: u64,
    motion_samples: u64,
    alerts_sent: u32,
    alerts_dropped: u32,
}

impl AlertService {
    pub fn new(config: SystemConfig) -> Self {
        let alarm = AlarmDriver::new(
            config.caution_toggle_interval_ms,
            config.danger_toggle_interval_ms,
        );
        Self {
            config,
            alarm,
            tier: None,
            last_distance_cm: 0,
            distance_samples: 0,
            motion_samples: 0,
            alerts_sent: 0,
            alerts_dropped: 0,
        }
    }

    /// Announce startup through the sink.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!(
            "AlertService started (safe>{}cm, danger<{}cm)",
            self.config.safe_distance_cm, self.config.danger_distance_cm
        );
    }

    // ── Distance monitor ──────────────────────────────────────

    /// One distance-monitor iteration: read the rangefinder, classify,
    /// drive the LEDs, arm/disarm the alarm, and message the severe tiers.
    ///
    /// Called once per coalesced distance-timer wakeup.  A failed read
    /// skips the sample and leaves every output unchanged, as does a
    /// reading that lands exactly on a tier boundary.
    pub fn on_distance_wake(
        &mut self,
        hw: &mut (impl DistancePort + ActuatorPort),
        alerts: &mut impl AlertPort,
        sink: &mut impl EventSink,
    ) {
        self.distance_samples += 1;

        let cm = match hw.read_distance_cm() {
            Ok(cm) => cm,
            Err(e) => {
                warn!("distance read failed: {e} — sample skipped");
                sink.emit(&AppEvent::SensorFault(e));
                return;
            }
        };
        self.last_distance_cm = cm;

        let tier = hazard::classify(cm, &self.config);
        sink.emit(&AppEvent::DistanceSampled { cm, tier });

        let Some(tier) = tier else {
            // Boundary gap — no actuation change this sample.
            return;
        };

        if self.tier != Some(tier) {
            sink.emit(&AppEvent::TierChanged {
                from: self.tier,
                to: tier,
            });
            info!("tier {:?} -> {:?} at {}cm", self.tier, tier, cm);
        }
        self.tier = Some(tier);

        hw.set_hazard_leds(tier.led_pattern());

        match AlarmSeverity::from_tier(tier) {
            Some(severity) => self.alarm.arm(severity),
            None => self.alarm.disarm(),
        }

        // The severe tiers re-send their message on every sample in band,
        // matching the one-message-per-triggering-event wire contract.
        match tier {
            HazardTier::Safe => {}
            HazardTier::Caution => self.send_alert(AlertKind::Caution, alerts, sink),
            HazardTier::Danger => self.send_alert(AlertKind::Danger, alerts, sink),
        }
    }

    // ── Motion monitor ────────────────────────────────────────

    /// One motion-monitor iteration: read the three accelerometer
    /// channels, sum them, and report a fall when the sum exceeds the
    /// configured threshold.
    ///
    /// Level-triggered by design: a sustained over-threshold condition
    /// re-sends the message on every sampling period it holds.  No LED or
    /// buzzer side effect on this path.
    pub fn on_motion_wake(
        &mut self,
        hw: &mut impl MotionPort,
        alerts: &mut impl AlertPort,
        sink: &mut impl EventSink,
    ) {
        self.motion_samples += 1;

        let channels = match hw.read_motion_channels() {
            Ok(ch) => ch,
            Err(e) => {
                warn!("motion read failed: {e} — sample skipped");
                sink.emit(&AppEvent::SensorFault(e));
                return;
            }
        };

        let sum: u32 = channels.iter().map(|&c| u32::from(c)).sum();
        if sum > self.config.fall_sum_threshold {
            sink.emit(&AppEvent::FallDetected { sum });
            self.send_alert(AlertKind::FallDetected, alerts, sink);
        }
    }

    // ── Alarm ─────────────────────────────────────────────────

    /// Advance the alarm square wave by `delta_ms` and apply any output
    /// change to the buzzer.  Called from the main loop every iteration.
    pub fn tick_alarm(&mut self, delta_ms: u32, hw: &mut impl ActuatorPort) {
        if let Some(level) = self.alarm.tick(delta_ms) {
            hw.set_buzzer(level);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current state.
    pub fn build_telemetry(&self, distance: &impl DistancePort) -> TelemetryData {
        TelemetryData {
            last_distance_cm: self.last_distance_cm,
            avg_distance_cm: distance.avg_distance_cm(),
            tier: self.tier,
            alarm: self.alarm.severity(),
            distance_samples: self.distance_samples,
            motion_samples: self.motion_samples,
            alerts_sent: self.alerts_sent,
            alerts_dropped: self.alerts_dropped,
        }
    }

    /// Most recent classified hazard tier.
    pub fn tier(&self) -> Option<HazardTier> {
        self.tier
    }

    /// Most recent raw distance sample (cm).
    pub fn last_distance_cm(&self) -> u16 {
        self.last_distance_cm
    }

    /// Whether the buzzer alarm is currently armed.
    pub fn alarm_armed(&self) -> bool {
        self.alarm.is_armed()
    }

    /// Messages successfully handed to the alert channel.
    pub fn alerts_sent(&self) -> u32 {
        self.alerts_sent
    }

    /// Messages refused by the alert channel.
    pub fn alerts_dropped(&self) -> u32 {
        self.alerts_dropped
    }

    // ── Internal ──────────────────────────────────────────────

    fn send_alert(
        &mut self,
        kind: AlertKind,
        alerts: &mut impl AlertPort,
        sink: &mut impl EventSink,
    ) {
        match alerts.send(kind) {
            Ok(()) => {
                self.alerts_sent += 1;
                sink.emit(&AppEvent::AlertRaised(kind));
            }
            Err(e) => {
                // Best-effort channel: count the drop and move on.
                self.alerts_dropped = self.alerts_dropped.saturating_add(1);
                warn!("alert {:?} dropped: {e}", kind);
                sink.emit(&AppEvent::AlertDropped(kind, e));
            }
        }
    }
}
