//! GPIO / peripheral pin assignments for the BikeAlert handlebar board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! Pin assignments match the production wiring:
//!
//! | Peripheral     | ESP32                |
//! |:--------------:|:---------------------|
//! | HC-SR04        | GPIO 3 (trig), GPIO 2 (echo) |
//! | buzzer         | GPIO 9               |
//! | accelerometer  | ADC1 CH1–CH3         |
//! | status UART    | UART1, GPIO 16/17    |

// ---------------------------------------------------------------------------
// HC-SR04 ultrasonic rangefinder
// ---------------------------------------------------------------------------

/// Digital output: 10 µs trigger pulse starts a ping cycle.
pub const ULTRASONIC_TRIGGER_GPIO: i32 = 3;
/// Digital input: echo pulse width encodes round-trip time.
pub const ULTRASONIC_ECHO_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Buzzer (piezo, driven directly from a GPIO)
// ---------------------------------------------------------------------------

/// Digital output: HIGH = buzzer sounding.
pub const BUZZER_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Hazard indicator LEDs
// ---------------------------------------------------------------------------

/// LED 1 — lit in every tier (power/heartbeat indicator).
pub const LED_1_GPIO: i32 = 11;
/// LED 2 — lit from Caution upward.
pub const LED_2_GPIO: i32 = 10;
/// LED 3 — lit only in Danger.
pub const LED_3_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Accelerometer — 3-axis analog output (ADC1)
// ---------------------------------------------------------------------------

/// ADC1 channel for the X axis.
pub const ACCEL_X_ADC_CH: u32 = 1;
/// ADC1 channel for the Y axis.
pub const ACCEL_Y_ADC_CH: u32 = 2;
/// ADC1 channel for the Z axis.
pub const ACCEL_Z_ADC_CH: u32 = 3;

// ---------------------------------------------------------------------------
// Status UART (connector to the helmet display / phone bridge)
// ---------------------------------------------------------------------------

/// UART port number for the status channel.
pub const STATUS_UART_NUM: u32 = 1;
pub const STATUS_UART_TX_GPIO: i32 = 16;
pub const STATUS_UART_RX_GPIO: i32 = 17;
