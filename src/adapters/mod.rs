//! Adapters — concrete implementations of the domain port traits.

pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod uart_alert;
