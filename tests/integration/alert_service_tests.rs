//! Integration tests for the AlertService → actuators/UART pipeline.
//!
//! These run on the host (x86_64) and exercise the full wakeup-to-output
//! chain — distance sample in, LED/buzzer/status-message out — against
//! the recording mock adapters, no real hardware required.

use crate::mock_hw::{ActuatorCall, LogSink, MockAlertChannel, MockHardware};

use bikealert::app::events::AppEvent;
use bikealert::app::service::AlertService;
use bikealert::config::SystemConfig;
use bikealert::error::SensorError;
use bikealert::hazard::{AlertKind, HazardTier, LedPattern};

fn make_rig() -> (AlertService, MockHardware, MockAlertChannel, LogSink) {
    let config = SystemConfig::default();
    let mut svc = AlertService::new(config);
    let hw = MockHardware::new();
    let alerts = MockAlertChannel::new();
    let mut sink = LogSink::new();
    svc.start(&mut sink);
    (svc, hw, alerts, sink)
}

// ── Tier actuation ────────────────────────────────────────────

#[test]
fn safe_distance_lights_led1_only_and_stays_silent() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();

    hw.queue_distance(600);
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);

    assert_eq!(svc.tier(), Some(HazardTier::Safe));
    assert_eq!(
        hw.leds_now(),
        Some(LedPattern {
            led1: true,
            led2: false,
            led3: false
        })
    );
    assert!(alerts.sent.is_empty(), "Safe tier sends no status message");
    assert!(!svc.alarm_armed());

    // A long stretch of ticks must never sound the buzzer while Safe.
    for _ in 0..50 {
        svc.tick_alarm(100, &mut hw);
    }
    assert!(!hw.buzzer_now());
}

#[test]
fn caution_band_lights_two_leds_and_sends_the_caution_message() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();

    hw.queue_distance(400);
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);

    assert_eq!(svc.tier(), Some(HazardTier::Caution));
    assert_eq!(
        hw.leds_now(),
        Some(LedPattern {
            led1: true,
            led2: true,
            led3: false
        })
    );
    assert_eq!(alerts.sent, vec![AlertKind::Caution]);
    assert_eq!(alerts.messages(), vec!["Precaución, vehículo cerca."]);
    assert!(svc.alarm_armed());
}

#[test]
fn danger_band_lights_all_leds_and_sends_the_danger_message() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();

    hw.queue_distance(200);
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);

    assert_eq!(svc.tier(), Some(HazardTier::Danger));
    assert_eq!(
        hw.leds_now(),
        Some(LedPattern {
            led1: true,
            led2: true,
            led3: true
        })
    );
    assert_eq!(alerts.messages(), vec!["Peligro, vehículo cerca."]);
    assert!(svc.alarm_armed());
}

#[test]
fn each_in_band_sample_resends_its_message() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();

    // Two consecutive Caution samples, one Danger.
    hw.queue_distance(400);
    hw.queue_distance(450);
    hw.queue_distance(100);
    for _ in 0..3 {
        svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);
    }

    assert_eq!(
        alerts.sent,
        vec![AlertKind::Caution, AlertKind::Caution, AlertKind::Danger]
    );
    assert_eq!(svc.alerts_sent(), 3);
}

// ── Buzzer cadence ────────────────────────────────────────────

#[test]
fn caution_buzzer_toggles_at_one_hertz() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();

    hw.queue_distance(400);
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);

    // 10 s of 100 ms ticks → 10 toggles at the 1000 ms Caution interval.
    for _ in 0..100 {
        svc.tick_alarm(100, &mut hw);
    }
    assert_eq!(hw.buzzer_edges(), 10);
}

#[test]
fn danger_buzzer_toggles_at_two_hertz() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();

    hw.queue_distance(200);
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);

    for _ in 0..100 {
        svc.tick_alarm(100, &mut hw);
    }
    assert_eq!(hw.buzzer_edges(), 20);
}

#[test]
fn receding_vehicle_cancels_the_alarm() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();

    hw.queue_distance(200);
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);
    svc.tick_alarm(500, &mut hw);
    assert!(hw.buzzer_now(), "alarm should be sounding in Danger");

    // Vehicle recedes: a Safe sample must stay reachable and silence the
    // buzzer on the very next tick.
    hw.queue_distance(800);
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);
    assert!(!svc.alarm_armed());
    svc.tick_alarm(1, &mut hw);
    assert!(!hw.buzzer_now());

    assert_eq!(svc.tier(), Some(HazardTier::Safe));
    assert_eq!(
        hw.leds_now(),
        Some(LedPattern {
            led1: true,
            led2: false,
            led3: false
        })
    );
}

// ── Boundary and fault handling ───────────────────────────────

#[test]
fn boundary_readings_leave_every_output_unchanged() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();

    hw.queue_distance(500);
    hw.queue_distance(300);
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);

    assert_eq!(svc.tier(), None, "a boundary reading classifies nothing");
    assert!(hw.calls.is_empty(), "no actuator commands on boundary samples");
    assert!(alerts.sent.is_empty());
    // The raw sample is still recorded for telemetry.
    assert_eq!(svc.last_distance_cm(), 300);
}

#[test]
fn echo_timeout_skips_the_sample_and_keeps_prior_outputs() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();

    hw.queue_distance(200);
    hw.queue_distance_fault(SensorError::EchoTimeout);
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);
    let calls_before = hw.calls.len();
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);

    // The failed read changes nothing: tier, LEDs and alarm all hold.
    assert_eq!(svc.tier(), Some(HazardTier::Danger));
    assert_eq!(hw.calls.len(), calls_before);
    assert!(svc.alarm_armed());
    assert_eq!(
        sink.count_matching(|e| matches!(e, AppEvent::SensorFault(_))),
        1
    );
}

// ── Fall detection ────────────────────────────────────────────

#[test]
fn over_threshold_motion_sum_sends_the_fall_message() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();

    hw.queue_motion([2, 2, 1]); // sum 5 > 4
    svc.on_motion_wake(&mut hw, &mut alerts, &mut sink);

    assert_eq!(alerts.messages(), vec!["Caida detectada."]);
    assert_eq!(
        sink.count_matching(|e| matches!(e, AppEvent::FallDetected { sum: 5 })),
        1
    );
}

#[test]
fn at_or_below_threshold_motion_sum_is_quiet() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();

    hw.queue_motion([1, 1, 1]); // sum 3
    hw.queue_motion([2, 1, 1]); // sum 4 — not strictly greater
    svc.on_motion_wake(&mut hw, &mut alerts, &mut sink);
    svc.on_motion_wake(&mut hw, &mut alerts, &mut sink);

    assert!(alerts.sent.is_empty());
    assert!(hw.calls.is_empty(), "fall path commands no LEDs or buzzer");
}

#[test]
fn sustained_fall_condition_resends_every_period() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();

    for _ in 0..3 {
        hw.queue_motion([3, 3, 3]);
        svc.on_motion_wake(&mut hw, &mut alerts, &mut sink);
    }
    // Level-triggered: one message per over-threshold sampling period.
    assert_eq!(alerts.sent, vec![AlertKind::FallDetected; 3]);
}

// ── Alert channel saturation ──────────────────────────────────

#[test]
fn saturated_channel_is_counted_and_never_panics() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();
    alerts.saturated = true;

    hw.queue_distance(200);
    hw.queue_motion([9, 9, 9]);
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);
    svc.on_motion_wake(&mut hw, &mut alerts, &mut sink);

    assert_eq!(svc.alerts_sent(), 0);
    assert_eq!(svc.alerts_dropped(), 2);
    // The actuation path is unaffected by the comms failure.
    assert_eq!(svc.tier(), Some(HazardTier::Danger));
    assert!(matches!(hw.leds_now(), Some(p) if p.led3));
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_snapshot_reflects_counters_and_state() {
    let (mut svc, mut hw, mut alerts, mut sink) = make_rig();

    hw.queue_distance(600);
    hw.queue_distance(400);
    hw.queue_motion([0, 0, 0]);
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);
    svc.on_distance_wake(&mut hw, &mut alerts, &mut sink);
    svc.on_motion_wake(&mut hw, &mut alerts, &mut sink);

    let t = svc.build_telemetry(&hw);
    assert_eq!(t.last_distance_cm, 400);
    assert_eq!(t.avg_distance_cm, Some(500));
    assert_eq!(t.tier, Some(HazardTier::Caution));
    assert_eq!(t.distance_samples, 2);
    assert_eq!(t.motion_samples, 1);
    assert_eq!(t.alerts_sent, 1);
    assert_eq!(t.alerts_dropped, 0);
}
