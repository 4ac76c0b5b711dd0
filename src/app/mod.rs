//! Application layer — the hexagonal core.
//!
//! [`service::AlertService`] holds the domain logic; [`ports`] defines the
//! trait boundary adapters implement; [`events`] carries the structured
//! events the service emits.

pub mod events;
pub mod ports;
pub mod service;
