//! BikeAlert Firmware — Main Entry Point
//!
//! Event-driven execution: two esp_timer periodic timers post coalesced
//! wakeups, the main loop consumes them and drives the domain service.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter       UartAlertChannel      LogEventSink      │
//! │  (Distance+Motion+     (AlertPort)           (EventSink)       │
//! │   Actuator ports)                                              │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            AlertService (pure logic)                   │    │
//! │  │  classify · alarm state machine · alert counters       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  distance timer (500 ms) ─┐                                    │
//! │  motion timer   (5 ms)  ──┴─▶ TaskWakeup (coalesced, 1 slot)   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use bikealert::adapters::hardware::HardwareAdapter;
use bikealert::adapters::log_sink::LogEventSink;
use bikealert::adapters::time::Esp32TimeAdapter;
use bikealert::adapters::uart_alert::UartAlertChannel;
use bikealert::app::events::AppEvent;
use bikealert::app::ports::EventSink;
use bikealert::app::service::AlertService;
use bikealert::config::SystemConfig;
use bikealert::drivers::buzzer::Buzzer;
use bikealert::drivers::hazard_leds::HazardLeds;
use bikealert::drivers::{hw_init, hw_timer};
use bikealert::notify::{DISTANCE_WAKEUP, MOTION_WAKEUP};
use bikealert::pins;
use bikealert::sensors::motion::MotionSensor;
use bikealert::sensors::ultrasonic::UltrasonicSensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  BikeAlert v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals(config.status_baud_rate) {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("{} — halting", bikealert::error::Error::from(e));
        #[allow(clippy::empty_loop)]
        loop {}
    }
    hw_timer::start_timers(
        config.distance_sample_period_us,
        config.motion_sample_period_us,
    );

    // ── 3. Construct adapters ─────────────────────────────────
    let rangefinder = UltrasonicSensor::new(
        pins::ULTRASONIC_TRIGGER_GPIO,
        pins::ULTRASONIC_ECHO_GPIO,
    );
    let accelerometer = MotionSensor::new([
        pins::ACCEL_X_ADC_CH,
        pins::ACCEL_Y_ADC_CH,
        pins::ACCEL_Z_ADC_CH,
    ]);
    let mut hw = HardwareAdapter::new(
        rangefinder,
        accelerometer,
        HazardLeds::new(),
        Buzzer::new(),
    );
    let mut alerts = UartAlertChannel::new();
    let mut log_sink = LogEventSink::new();
    let time = Esp32TimeAdapter::new();

    // ── 4. Construct the service ──────────────────────────────
    let mut service = AlertService::new(config.clone());
    service.start(&mut log_sink);

    info!("System ready. Entering event loop.");

    // ── 5. Event loop ─────────────────────────────────────────
    let mut last_tick_ms = time.uptime_ms();
    let mut last_telemetry_ms = last_tick_ms;
    #[cfg(not(target_os = "espidf"))]
    let mut sim_iterations: u64 = 0;

    loop {
        // Yield to FreeRTOS between passes; the timer callbacks run in the
        // esp_timer task and post wakeups while we sleep.
        #[cfg(target_os = "espidf")]
        esp_idf_hal::delay::FreeRtos::delay_ms(1);

        // Simulate the timer cadences via sleep on non-espidf targets.
        // On real hardware, the esp_timer callbacks post the wakeups and
        // the CPU idles between them.
        #[cfg(not(target_os = "espidf"))]
        {
            std::thread::sleep(std::time::Duration::from_micros(
                config.motion_sample_period_us,
            ));
            sim_iterations += 1;
            MOTION_WAKEUP.notify_from_isr();
            let ratio = config.distance_sample_period_us / config.motion_sample_period_us;
            if sim_iterations % ratio.max(1) == 0 {
                DISTANCE_WAKEUP.notify_from_isr();
            }
        }

        // Consume the coalesced wakeups — at most one iteration per
        // monitor per loop pass, whatever the timers did in between.
        if DISTANCE_WAKEUP.take() {
            service.on_distance_wake(&mut hw, &mut alerts, &mut log_sink);
        }
        if MOTION_WAKEUP.take() {
            service.on_motion_wake(&mut hw, &mut alerts, &mut log_sink);
        }

        // Advance the alarm square wave by the wall time elapsed since
        // the last pass.  A new classification above re-arms or cancels
        // it, so the buzzer always tracks the latest tier.
        let now_ms = time.uptime_ms();
        let delta_ms = now_ms.saturating_sub(last_tick_ms) as u32;
        last_tick_ms = now_ms;
        service.tick_alarm(delta_ms, &mut hw);

        // Periodic telemetry snapshot.
        if now_ms.saturating_sub(last_telemetry_ms)
            >= u64::from(config.telemetry_interval_secs) * 1000
        {
            last_telemetry_ms = now_ms;
            let t = service.build_telemetry(&hw);
            log_sink.emit(&AppEvent::Telemetry(t));
        }
    }
}
