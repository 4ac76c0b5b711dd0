//! BikeAlert firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod config;
pub mod error;
pub mod hazard;
pub mod notify;

pub mod pins;

mod esp_link_shims;

// Re-export the ESPidf-only modules so the crate compiles; the actual
// implementations are guarded by cfg attributes inside.
pub mod adapters;
pub mod drivers;
pub mod sensors;
