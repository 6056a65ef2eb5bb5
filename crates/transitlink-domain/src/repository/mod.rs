//! Repository trait definitions for vehicle data sources

use transitlink_types::{RemoteError, Vehicle};

/// The remote vehicle registry's CRUD contract.
///
/// Each call is a single blocking round-trip with no retry. Implementations
/// must not cache: the reconciliation layer owns the in-memory collection.
pub trait VehicleRegistry {
    /// Fetch all vehicles, most-recently-created first
    fn list(&self) -> Result<Vec<Vehicle>, RemoteError>;

    /// Register a vehicle; returns the remote-confirmed record
    fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, RemoteError>;

    /// Replace the vehicle with the matching id wholesale
    fn replace(&self, vehicle: &Vehicle) -> Result<Vehicle, RemoteError>;

    /// Delete a vehicle by id; unknown ids report `RemoteError::NotFound`
    fn remove(&self, id: &str) -> Result<(), RemoteError>;
}
