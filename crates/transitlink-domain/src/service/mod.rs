//! Domain services

pub mod alerts;

pub use alerts::derive_alerts;
