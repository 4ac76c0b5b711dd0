//! Mock hardware adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO or ADC registers.

use std::collections::VecDeque;

use bikealert::app::events::AppEvent;
use bikealert::app::ports::{ActuatorPort, AlertPort, DistancePort, EventSink, MotionPort};
use bikealert::error::{CommsError, SensorError};
use bikealert::hazard::{AlertKind, LedPattern};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    SetLeds(LedPattern),
    SetBuzzer(bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

/// Scripted sensors plus a recording actuator bank.
///
/// Distance and motion readings are queued ahead of the test; each port
/// read pops the next entry.  Reading past the end of a script surfaces
/// as a sensor fault, which the service treats as a skipped sample.
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    distance_script: VecDeque<Result<u16, SensorError>>,
    motion_script: VecDeque<Result<[u16; 3], SensorError>>,
    good_distances: Vec<u16>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            distance_script: VecDeque::new(),
            motion_script: VecDeque::new(),
            good_distances: Vec::new(),
        }
    }

    pub fn queue_distance(&mut self, cm: u16) {
        self.distance_script.push_back(Ok(cm));
    }

    pub fn queue_distance_fault(&mut self, e: SensorError) {
        self.distance_script.push_back(Err(e));
    }

    pub fn queue_motion(&mut self, channels: [u16; 3]) {
        self.motion_script.push_back(Ok(channels));
    }

    pub fn queue_motion_fault(&mut self, e: SensorError) {
        self.motion_script.push_back(Err(e));
    }

    /// The LED pattern as left by the most recent actuator command.
    pub fn leds_now(&self) -> Option<LedPattern> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::SetLeds(p) => Some(*p),
            ActuatorCall::AllOff => Some(LedPattern::ALL_OFF),
            _ => None,
        })
    }

    /// The buzzer level as left by the most recent actuator command.
    pub fn buzzer_now(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetBuzzer(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Number of buzzer level changes recorded (edge count).
    pub fn buzzer_edges(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::SetBuzzer(_)))
            .count()
    }
}

impl DistancePort for MockHardware {
    fn read_distance_cm(&mut self) -> Result<u16, SensorError> {
        let r = self
            .distance_script
            .pop_front()
            .unwrap_or(Err(SensorError::EchoTimeout));
        if let Ok(cm) = r {
            self.good_distances.push(cm);
        }
        r
    }

    fn avg_distance_cm(&self) -> Option<u16> {
        if self.good_distances.is_empty() {
            return None;
        }
        let sum: u32 = self.good_distances.iter().map(|&d| u32::from(d)).sum();
        Some((sum / self.good_distances.len() as u32) as u16)
    }
}

impl MotionPort for MockHardware {
    fn read_motion_channels(&mut self) -> Result<[u16; 3], SensorError> {
        self.motion_script
            .pop_front()
            .unwrap_or(Err(SensorError::AdcReadFailed))
    }
}

impl ActuatorPort for MockHardware {
    fn set_hazard_leds(&mut self, pattern: LedPattern) {
        self.calls.push(ActuatorCall::SetLeds(pattern));
    }

    fn set_buzzer(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetBuzzer(on));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── MockAlertChannel ──────────────────────────────────────────

/// Records every status message handed to the channel; can be switched
/// into saturation to model a full or disconnected serial link.
pub struct MockAlertChannel {
    pub sent: Vec<AlertKind>,
    pub saturated: bool,
}

#[allow(dead_code)]
impl MockAlertChannel {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            saturated: false,
        }
    }

    pub fn messages(&self) -> Vec<&'static str> {
        self.sent.iter().map(|k| k.message()).collect()
    }
}

impl AlertPort for MockAlertChannel {
    fn send(&mut self, kind: AlertKind) -> Result<(), CommsError> {
        if self.saturated {
            return Err(CommsError::ChannelSaturated);
        }
        self.sent.push(kind);
        Ok(())
    }
}

// ── LogSink ───────────────────────────────────────────────────

/// Event sink that records every emitted event for later assertion.
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count_matching(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
