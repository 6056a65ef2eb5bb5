//! Application services

pub mod fleet_service;

pub use fleet_service::{FleetService, Mode};
