//! HC-SR04 ultrasonic rangefinder driver.
//!
//! One measurement is a blocking ping/echo cycle: a 10 µs trigger pulse,
//! then the echo pin goes high for a duration proportional to the
//! round-trip time of the ultrasonic burst.  Distance in centimetres is
//! `pulse_us / 58`.
//!
//! The driver keeps a short history of good samples for the telemetry
//! average; a failed read leaves the history untouched.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the trigger GPIO and polls the echo GPIO against
//! `esp_timer_get_time()`, with a hard timeout so a disconnected sensor
//! surfaces as [`SensorError::EchoTimeout`] instead of hanging the loop.
//! On host/test: reads from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use heapless::HistoryBuffer;

use crate::error::SensorError;

#[cfg(not(target_os = "espidf"))]
static SIM_DISTANCE_CM: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_ECHO_TIMEOUT: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_distance_cm(cm: u16) {
    SIM_DISTANCE_CM.store(cm, Ordering::Relaxed);
}

/// Make the next reads fail as if the echo never arrived.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_echo_timeout(timeout: bool) {
    SIM_ECHO_TIMEOUT.store(timeout, Ordering::Relaxed);
}

/// Samples kept for the telemetry running average.
const HISTORY_LEN: usize = 8;

/// Echo wait ceiling.  The sensor's maximum range (~400 cm) corresponds to
/// a ~23 ms pulse; anything beyond ~38 ms means no echo is coming.
const ECHO_TIMEOUT_US: u64 = 38_000;

/// Round-trip microseconds per centimetre of distance.
const US_PER_CM: u64 = 58;

pub struct UltrasonicSensor {
    _trigger_gpio: i32,
    _echo_gpio: i32,
    history: HistoryBuffer<u16, HISTORY_LEN>,
    total_reads: u32,
    timeouts: u32,
}

impl UltrasonicSensor {
    pub fn new(trigger_gpio: i32, echo_gpio: i32) -> Self {
        Self {
            _trigger_gpio: trigger_gpio,
            _echo_gpio: echo_gpio,
            history: HistoryBuffer::new(),
            total_reads: 0,
            timeouts: 0,
        }
    }

    /// Perform one blocking ping/echo cycle.
    pub fn read_distance_cm(&mut self) -> Result<u16, SensorError> {
        self.total_reads = self.total_reads.saturating_add(1);

        let cm = match self.measure() {
            Ok(cm) => cm,
            Err(e) => {
                if e == SensorError::EchoTimeout {
                    self.timeouts = self.timeouts.saturating_add(1);
                }
                return Err(e);
            }
        };

        self.history.write(cm);
        Ok(cm)
    }

    /// Mean of the recent good samples, `None` before the first one.
    pub fn avg_distance_cm(&self) -> Option<u16> {
        if self.history.len() == 0 {
            return None;
        }
        let sum: u32 = self.history.iter().map(|&cm| u32::from(cm)).sum();
        Some((sum / self.history.len() as u32) as u16)
    }

    /// Echo timeouts observed since boot.
    pub fn timeout_count(&self) -> u32 {
        self.timeouts
    }

    #[cfg(target_os = "espidf")]
    fn measure(&mut self) -> Result<u16, SensorError> {
        use crate::drivers::hw_init;
        use esp_idf_svc::sys::{esp_rom_delay_us, esp_timer_get_time};

        // 10 µs trigger pulse, preceded by a short settle.
        hw_init::gpio_write(self._trigger_gpio, false);
        // SAFETY: esp_rom_delay_us is a busy-wait ROM routine, callable
        // from any task context.
        unsafe { esp_rom_delay_us(2) };
        hw_init::gpio_write(self._trigger_gpio, true);
        unsafe { esp_rom_delay_us(10) };
        hw_init::gpio_write(self._trigger_gpio, false);

        // SAFETY: esp_timer_get_time is a monotonic counter read.
        let now_us = || unsafe { esp_timer_get_time() } as u64;

        // Wait for the echo to start.
        let wait_start = now_us();
        while !hw_init::gpio_read(self._echo_gpio) {
            if now_us() - wait_start > ECHO_TIMEOUT_US {
                return Err(SensorError::EchoTimeout);
            }
        }

        // Measure the pulse width.
        let pulse_start = now_us();
        while hw_init::gpio_read(self._echo_gpio) {
            if now_us() - pulse_start > ECHO_TIMEOUT_US {
                return Err(SensorError::EchoTimeout);
            }
        }
        let pulse_us = now_us() - pulse_start;

        let cm = pulse_us / US_PER_CM;
        u16::try_from(cm).map_err(|_| SensorError::OutOfRange)
    }

    #[cfg(not(target_os = "espidf"))]
    fn measure(&mut self) -> Result<u16, SensorError> {
        if SIM_ECHO_TIMEOUT.load(Ordering::Relaxed) {
            return Err(SensorError::EchoTimeout);
        }
        Ok(SIM_DISTANCE_CM.load(Ordering::Relaxed))
    }
}
