//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).  A
//! future display or BLE adapter would implement the same trait.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | dist={}cm (avg {}) | tier={:?} | alarm={:?} | \
                     samples d={} m={} | alerts sent={} dropped={}",
                    t.last_distance_cm,
                    t.avg_distance_cm
                        .map_or_else(|| "n/a".to_string(), |cm| format!("{}cm", cm)),
                    t.tier,
                    t.alarm,
                    t.distance_samples,
                    t.motion_samples,
                    t.alerts_sent,
                    t.alerts_dropped,
                );
            }
            AppEvent::DistanceSampled { cm, tier } => {
                debug!("SAMPLE | {}cm -> {:?}", cm, tier);
            }
            AppEvent::TierChanged { from, to } => {
                info!("TIER | {:?} -> {:?}", from, to);
            }
            AppEvent::AlertRaised(kind) => {
                info!("ALERT | {:?}", kind);
            }
            AppEvent::AlertDropped(kind, e) => {
                warn!("ALERT | {:?} dropped ({})", kind, e);
            }
            AppEvent::FallDetected { sum } => {
                info!("FALL | channel sum={}", sum);
            }
            AppEvent::SensorFault(e) => {
                warn!("FAULT | {}", e);
            }
            AppEvent::Started => {
                info!("START | monitors live");
            }
        }
    }
}
