//! UART alert channel adapter.
//!
//! Implements [`AlertPort`] over the status UART: each alert kind maps to
//! its fixed literal string, written unbuffered and fire-and-forget.  No
//! acknowledgement, no retry — a partial write means the TX ring buffer is
//! full and surfaces as [`CommsError::ChannelSaturated`] for the service
//! to count.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes through the UART driver installed in hw_init.
//! On host/test: counts sends and logs the message.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(not(target_os = "espidf"))]
use log::debug;

use crate::app::ports::AlertPort;
use crate::error::CommsError;
use crate::hazard::AlertKind;

#[cfg(not(target_os = "espidf"))]
static SIM_SENT_COUNT: AtomicU32 = AtomicU32::new(0);

/// Messages the sim channel has accepted since boot (host targets only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_sent_count() -> u32 {
    SIM_SENT_COUNT.load(Ordering::Relaxed)
}

pub struct UartAlertChannel;

impl UartAlertChannel {
    pub fn new() -> Self {
        Self
    }
}

impl AlertPort for UartAlertChannel {
    #[cfg(target_os = "espidf")]
    fn send(&mut self, kind: AlertKind) -> Result<(), CommsError> {
        let bytes = kind.message().as_bytes();
        match crate::drivers::hw_init::uart_write(bytes) {
            Ok(n) if n == bytes.len() => Ok(()),
            // The TX ring buffer took only part of the message; the frame
            // is unrecoverable, report saturation.
            Ok(_) => Err(CommsError::ChannelSaturated),
            Err(_) => Err(CommsError::UartWriteFailed),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn send(&mut self, kind: AlertKind) -> Result<(), CommsError> {
        SIM_SENT_COUNT.fetch_add(1, Ordering::Relaxed);
        debug!("uart_alert(sim): {}", kind.message());
        Ok(())
    }
}
