//! Severity-parameterized buzzer alarm.
//!
//! Generates a square wave on the buzzer output whose period encodes the
//! hazard severity: Caution toggles every 1000 ms (1 Hz), Danger every
//! 500 ms (2 Hz).  The main loop calls [`AlarmDriver::tick`] each
//! iteration with the elapsed time; the driver returns the new output
//! level whenever it changes, and the caller forwards that to the buzzer
//! pin.
//!
//! The deployed firmware ran the alarm as an unconditional `while(true)`
//! toggle-and-sleep loop, which never returned control to the distance
//! monitor — once Caution or Danger fired, distance was never re-sampled
//! again.  This driver replaces that with a cancellable state machine: a
//! fresh classification re-arms or disarms it between samples and the
//! monitor loop stays live.

use crate::hazard::HazardTier;

/// Severity levels the alarm can sound at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmSeverity {
    /// 1 Hz square wave (toggle every 1000 ms by default).
    Caution,
    /// 2 Hz square wave (toggle every 500 ms by default).
    Danger,
}

impl AlarmSeverity {
    /// Map a hazard tier onto an alarm severity.  Safe carries no alarm.
    pub fn from_tier(tier: HazardTier) -> Option<Self> {
        match tier {
            HazardTier::Safe => None,
            HazardTier::Caution => Some(Self::Caution),
            HazardTier::Danger => Some(Self::Danger),
        }
    }
}

/// Tick-driven buzzer toggle state machine.  Stack-allocated, no heap.
pub struct AlarmDriver {
    caution_interval_ms: u32,
    danger_interval_ms: u32,
    armed: Option<AlarmSeverity>,
    phase_ms: u32,
    level: bool,
    /// Set when a disarm must force the output low on the next tick.
    pending_silence: bool,
}

impl AlarmDriver {
    /// `caution_interval_ms` / `danger_interval_ms` are the toggle
    /// intervals (half-periods of the square wave) for each severity.
    pub fn new(caution_interval_ms: u32, danger_interval_ms: u32) -> Self {
        Self {
            caution_interval_ms,
            danger_interval_ms,
            armed: None,
            phase_ms: 0,
            level: false,
            pending_silence: false,
        }
    }

    /// Arm the alarm at the given severity.  Re-arming at the same
    /// severity preserves the current phase; changing severity restarts
    /// the wave so the new frequency is heard immediately.
    pub fn arm(&mut self, severity: AlarmSeverity) {
        if self.armed != Some(severity) {
            self.armed = Some(severity);
            self.phase_ms = 0;
            self.pending_silence = false;
        }
    }

    /// Cancel the alarm.  The output is driven low on the next tick.
    pub fn disarm(&mut self) {
        if self.armed.is_some() || self.level {
            self.pending_silence = true;
        }
        self.armed = None;
        self.phase_ms = 0;
    }

    /// Whether the alarm is currently armed.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Current severity, if armed.
    pub fn severity(&self) -> Option<AlarmSeverity> {
        self.armed
    }

    /// Current output level.
    pub fn level(&self) -> bool {
        self.level
    }

    /// Advance the wave by `delta_ms`.  Returns `Some(level)` when the
    /// buzzer output must change, `None` when it should stay as-is.
    pub fn tick(&mut self, delta_ms: u32) -> Option<bool> {
        if self.pending_silence {
            self.pending_silence = false;
            self.level = false;
            return Some(false);
        }

        let interval = match self.armed {
            Some(AlarmSeverity::Caution) => self.caution_interval_ms,
            Some(AlarmSeverity::Danger) => self.danger_interval_ms,
            None => return None,
        };
        if interval == 0 {
            return None;
        }

        self.phase_ms = self.phase_ms.saturating_add(delta_ms);
        let mut changed = false;
        while self.phase_ms >= interval {
            self.phase_ms -= interval;
            self.level = !self.level;
            changed = true;
        }
        changed.then_some(self.level)
    }
}
