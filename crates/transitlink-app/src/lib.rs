//! Application service layer - reconciliation controller, config, auth

pub mod app;
pub mod auth;
pub mod config;
pub mod repository;

pub use app::{FleetService, Mode};
pub use config::Config;
