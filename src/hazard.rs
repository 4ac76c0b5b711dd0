//! Hazard tier classification.
//!
//! A distance reading maps onto a three-level tier, and each tier onto an
//! LED pattern, an alarm severity, and (for the two severe tiers) a status
//! message.  The tier is derived fresh from every sample — no history is
//! kept beyond the immediately preceding raw distance value held by the
//! service.
//!
//! | Condition (cm)  | Tier    | LEDs     | Alarm | Message                       |
//! |-----------------|---------|----------|-------|-------------------------------|
//! | d > 500         | Safe    | 1        | —     | —                             |
//! | 300 < d < 500   | Caution | 1, 2     | 1 Hz  | "Precaución, vehículo cerca." |
//! | d < 300         | Danger  | 1, 2, 3  | 2 Hz  | "Peligro, vehículo cerca."    |
//!
//! Readings of exactly 300 or 500 cm fall in the comparison gap between the
//! strict inequalities and match no tier; [`classify`] returns `None` and the
//! monitor leaves every output unchanged for that sample.  This mirrors the
//! deployed firmware's behaviour on the boundary values, gap included.

use crate::config::SystemConfig;

// ───────────────────────────────────────────────────────────────
//  Hazard tier
// ───────────────────────────────────────────────────────────────

/// Discrete hazard classification derived from one distance sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HazardTier {
    /// No vehicle within range — informational LED only.
    Safe,
    /// Vehicle approaching — two LEDs, slow alarm, caution message.
    Caution,
    /// Vehicle close — all LEDs, fast alarm, danger message.
    Danger,
}

/// Classify a distance reading against the configured tier boundaries.
///
/// Returns `None` when the reading lands exactly on a boundary; the caller
/// must treat that as "no tier transition this sample".
pub fn classify(distance_cm: u16, config: &SystemConfig) -> Option<HazardTier> {
    if distance_cm > config.safe_distance_cm {
        Some(HazardTier::Safe)
    } else if distance_cm > config.danger_distance_cm && distance_cm < config.safe_distance_cm {
        Some(HazardTier::Caution)
    } else if distance_cm < config.danger_distance_cm {
        Some(HazardTier::Danger)
    } else {
        // Exactly on a boundary — the strict comparisons leave a gap.
        None
    }
}

// ───────────────────────────────────────────────────────────────
//  LED pattern
// ───────────────────────────────────────────────────────────────

/// Desired state of the three hazard indicator LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedPattern {
    pub led1: bool,
    pub led2: bool,
    pub led3: bool,
}

impl LedPattern {
    pub const ALL_OFF: LedPattern = LedPattern {
        led1: false,
        led2: false,
        led3: false,
    };
}

impl HazardTier {
    /// LED pattern this tier drives.
    pub fn led_pattern(self) -> LedPattern {
        match self {
            Self::Safe => LedPattern {
                led1: true,
                led2: false,
                led3: false,
            },
            Self::Caution => LedPattern {
                led1: true,
                led2: true,
                led3: false,
            },
            Self::Danger => LedPattern {
                led1: true,
                led2: true,
                led3: true,
            },
        }
    }
}

// ───────────────────────────────────────────────────────────────
//  Alert kinds and status messages
// ───────────────────────────────────────────────────────────────

/// Selector for the fixed status messages sent over the UART channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// A vehicle entered the Caution band.
    Caution,
    /// A vehicle entered the Danger band.
    Danger,
    /// The accelerometer sum crossed the fall threshold.
    FallDetected,
}

impl AlertKind {
    /// The literal wire message for this alert.  Plain text, no framing.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Caution => "Precaución, vehículo cerca.",
            Self::Danger => "Peligro, vehículo cerca.",
            Self::FallDetected => "Caida detectada.",
        }
    }
}

// ───────────────────────────────────────────────────────────────
//  Tests
// ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SystemConfig {
        SystemConfig::default()
    }

    #[test]
    fn far_readings_are_safe() {
        assert_eq!(classify(501, &cfg()), Some(HazardTier::Safe));
        assert_eq!(classify(600, &cfg()), Some(HazardTier::Safe));
        assert_eq!(classify(u16::MAX, &cfg()), Some(HazardTier::Safe));
    }

    #[test]
    fn mid_band_is_caution() {
        assert_eq!(classify(301, &cfg()), Some(HazardTier::Caution));
        assert_eq!(classify(400, &cfg()), Some(HazardTier::Caution));
        assert_eq!(classify(499, &cfg()), Some(HazardTier::Caution));
    }

    #[test]
    fn close_readings_are_danger() {
        assert_eq!(classify(299, &cfg()), Some(HazardTier::Danger));
        assert_eq!(classify(200, &cfg()), Some(HazardTier::Danger));
        assert_eq!(classify(0, &cfg()), Some(HazardTier::Danger));
    }

    #[test]
    fn boundary_values_match_no_tier() {
        // 300 and 500 fall in the strict-comparison gap.
        assert_eq!(classify(300, &cfg()), None);
        assert_eq!(classify(500, &cfg()), None);
    }

    #[test]
    fn led_patterns_are_monotonic() {
        let safe = HazardTier::Safe.led_pattern();
        let caution = HazardTier::Caution.led_pattern();
        let danger = HazardTier::Danger.led_pattern();

        assert_eq!(safe, LedPattern { led1: true, led2: false, led3: false });
        assert_eq!(caution, LedPattern { led1: true, led2: true, led3: false });
        assert_eq!(danger, LedPattern { led1: true, led2: true, led3: true });
    }

    #[test]
    fn alert_messages_match_wire_contract() {
        assert_eq!(AlertKind::Caution.message(), "Precaución, vehículo cerca.");
        assert_eq!(AlertKind::Danger.message(), "Peligro, vehículo cerca.");
        assert_eq!(AlertKind::FallDetected.message(), "Caida detectada.");
    }
}
