//! Remote registry access

mod http_registry;

pub use http_registry::HttpVehicleRegistry;
