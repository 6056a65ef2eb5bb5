//! Wiring helpers for the persistence and remote layers

use std::path::PathBuf;

use transitlink_infra::HttpVehicleRegistry;
use transitlink_store::FallbackStore;
use transitlink_types::Result;

use crate::app::FleetService;
use crate::config::Config;

/// Open the fallback store at the configured directory
pub fn open_fallback_store(config: &Config) -> Result<FallbackStore> {
    let store_dir = config.store_dir()?;
    FallbackStore::open(store_dir)
}

/// Open the fallback store at a custom directory
pub fn open_fallback_store_at(store_dir: PathBuf) -> Result<FallbackStore> {
    FallbackStore::open(store_dir)
}

/// Build the HTTP registry client for the configured API base URL
pub fn open_registry(config: &Config) -> HttpVehicleRegistry {
    HttpVehicleRegistry::new(config.api_base_url.clone())
}

/// Assemble a fleet service from the configuration
pub fn open_fleet_service(config: &Config) -> Result<FleetService<HttpVehicleRegistry>> {
    let registry = open_registry(config);
    let fallback = open_fallback_store(config)?;
    Ok(FleetService::new(registry, fallback))
}
