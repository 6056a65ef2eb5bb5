//! Fleet Service - the reconciliation controller
//!
//! Owns the single authoritative in-memory vehicle collection and a binary
//! connectivity mode. Every mutation prefers the remote registry and falls
//! back to local-only persistence when the remote fails:
//!
//! - `load` always tries the remote first, regardless of mode. It is the only
//!   recovery point: a failed mutation demotes to Offline, and nothing but a
//!   subsequent successful `load` promotes back to Online. Mutations made
//!   while Offline never probe the remote.
//! - Online mutations that fail are applied locally, mirrored to the fallback
//!   store, and demote the mode. `NotFound` from the remote is logged
//!   separately but takes the same path as any other remote failure.
//! - A successful `load` replaces the collection with the remote snapshot,
//!   discarding any Offline-only edits made since the last sync.

use tracing::{info, warn};

use transitlink_domain::model::Alert;
use transitlink_domain::repository::VehicleRegistry;
use transitlink_domain::service::derive_alerts;
use transitlink_store::FallbackStore;
use transitlink_types::{RemoteError, Result, Vehicle};

/// Whether the controller currently trusts the remote registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Online,
    Offline,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Online => "Online",
            Mode::Offline => "Offline",
        }
    }
}

/// Reconciliation controller for the vehicle collection
pub struct FleetService<R: VehicleRegistry> {
    registry: R,
    fallback: FallbackStore,
    mode: Mode,
    vehicles: Vec<Vehicle>,
}

impl<R: VehicleRegistry> FleetService<R> {
    /// Each session starts Online with an empty collection; call `load`
    /// to populate it.
    pub fn new(registry: R, fallback: FallbackStore) -> Self {
        Self {
            registry,
            fallback,
            mode: Mode::Online,
            vehicles: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_offline(&self) -> bool {
        self.mode == Mode::Offline
    }

    /// The authoritative in-memory collection
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Derive the current alert list from the collection
    pub fn alerts(&self) -> Vec<Alert> {
        derive_alerts(&self.vehicles)
    }

    /// Refresh the collection from the remote registry.
    ///
    /// Tries the remote even when Offline; this is the sole recovery
    /// trigger. On failure the collection reverts to the last fallback
    /// snapshot (or the seed) and the mode demotes to Offline.
    pub fn load(&mut self) -> Result<&[Vehicle]> {
        match self.registry.list() {
            Ok(vehicles) => {
                self.fallback.write(&vehicles)?;
                self.vehicles = vehicles;
                if self.mode == Mode::Offline {
                    info!("Remote registry reachable again, back online");
                }
                self.mode = Mode::Online;
            }
            Err(err) => {
                warn!("Remote registry unavailable, reverting to local fallback: {err}");
                self.vehicles = self.fallback.read();
                self.mode = Mode::Offline;
            }
        }
        Ok(&self.vehicles)
    }

    /// Register a vehicle
    pub fn add(&mut self, vehicle: Vehicle) -> Result<()> {
        if self.mode == Mode::Offline {
            let mut next = self.vehicles.clone();
            next.push(vehicle);
            return self.commit_local(next);
        }
        match self.registry.create(&vehicle) {
            Ok(saved) => {
                self.vehicles.push(saved);
                Ok(())
            }
            Err(err) => {
                self.demote("create", &err);
                let mut next = self.vehicles.clone();
                next.push(vehicle);
                self.commit_local(next)
            }
        }
    }

    /// Replace the vehicle with the matching id wholesale.
    ///
    /// An unknown id is a no-op, not an error.
    pub fn update(&mut self, updated: Vehicle) -> Result<()> {
        if self.mode == Mode::Offline {
            let next = Self::replaced(&self.vehicles, &updated);
            return self.commit_local(next);
        }
        match self.registry.replace(&updated) {
            Ok(saved) => {
                self.vehicles = Self::replaced(&self.vehicles, &saved);
                Ok(())
            }
            Err(err) => {
                self.demote("replace", &err);
                let next = Self::replaced(&self.vehicles, &updated);
                self.commit_local(next)
            }
        }
    }

    /// Remove the vehicle with the given id
    pub fn delete(&mut self, id: &str) -> Result<()> {
        if self.mode == Mode::Offline {
            let next = Self::removed(&self.vehicles, id);
            return self.commit_local(next);
        }
        match self.registry.remove(id) {
            Ok(()) => {
                self.vehicles = Self::removed(&self.vehicles, id);
                Ok(())
            }
            Err(err) => {
                self.demote("remove", &err);
                let next = Self::removed(&self.vehicles, id);
                self.commit_local(next)
            }
        }
    }

    /// Compute the next collection for a full-replacement update
    fn replaced(vehicles: &[Vehicle], updated: &Vehicle) -> Vec<Vehicle> {
        vehicles
            .iter()
            .map(|v| {
                if v.id == updated.id {
                    updated.clone()
                } else {
                    v.clone()
                }
            })
            .collect()
    }

    /// Compute the next collection for a deletion
    fn removed(vehicles: &[Vehicle], id: &str) -> Vec<Vehicle> {
        vehicles.iter().filter(|v| v.id != id).cloned().collect()
    }

    /// Apply a locally computed collection atomically and mirror it
    fn commit_local(&mut self, next: Vec<Vehicle>) -> Result<()> {
        self.fallback.write(&next)?;
        self.vehicles = next;
        Ok(())
    }

    /// Record a remote failure and switch to Offline
    fn demote(&mut self, op: &str, err: &RemoteError) {
        match err {
            RemoteError::NotFound(id) => {
                warn!("Remote {op} reported unknown vehicle {id}, applying locally")
            }
            _ => warn!("Remote {op} failed, applying locally: {err}"),
        }
        self.mode = Mode::Offline;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use tempfile::tempdir;
    use transitlink_domain::model::AlertKind;
    use transitlink_types::{Location, VehicleStatus, VehicleType};

    /// In-memory registry double; `available` can be flipped mid-test
    struct MockRegistry {
        vehicles: RefCell<Vec<Vehicle>>,
        available: Cell<bool>,
        list_calls: Cell<u32>,
    }

    impl MockRegistry {
        fn new(vehicles: Vec<Vehicle>) -> Self {
            Self {
                vehicles: RefCell::new(vehicles),
                available: Cell::new(true),
                list_calls: Cell::new(0),
            }
        }

        fn down(self) -> Self {
            self.available.set(false);
            self
        }

        fn check(&self) -> std::result::Result<(), RemoteError> {
            if self.available.get() {
                Ok(())
            } else {
                Err(RemoteError::Unavailable("connection refused".to_string()))
            }
        }
    }

    impl VehicleRegistry for MockRegistry {
        fn list(&self) -> std::result::Result<Vec<Vehicle>, RemoteError> {
            self.list_calls.set(self.list_calls.get() + 1);
            self.check()?;
            Ok(self.vehicles.borrow().clone())
        }

        fn create(&self, vehicle: &Vehicle) -> std::result::Result<Vehicle, RemoteError> {
            self.check()?;
            self.vehicles.borrow_mut().push(vehicle.clone());
            Ok(vehicle.clone())
        }

        fn replace(&self, vehicle: &Vehicle) -> std::result::Result<Vehicle, RemoteError> {
            self.check()?;
            let mut vehicles = self.vehicles.borrow_mut();
            match vehicles.iter_mut().find(|v| v.id == vehicle.id) {
                Some(slot) => {
                    *slot = vehicle.clone();
                    Ok(vehicle.clone())
                }
                None => Err(RemoteError::NotFound(vehicle.id.clone())),
            }
        }

        fn remove(&self, id: &str) -> std::result::Result<(), RemoteError> {
            self.check()?;
            let mut vehicles = self.vehicles.borrow_mut();
            let before = vehicles.len();
            vehicles.retain(|v| v.id != id);
            if vehicles.len() == before {
                return Err(RemoteError::NotFound(id.to_string()));
            }
            Ok(())
        }
    }

    fn vehicle(id: &str, status: VehicleStatus) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            reg_number: format!("KHI-{id}"),
            kind: VehicleType::Truck,
            driver_name: "driver".to_string(),
            status,
            last_location: Location {
                lat: 24.9,
                lng: 67.1,
                timestamp: 1,
            },
            history: vec![Location {
                lat: 24.9,
                lng: 67.1,
                timestamp: 1,
            }],
            capacity: 10,
        }
    }

    fn service_with(
        registry: MockRegistry,
        dir: &tempfile::TempDir,
    ) -> FleetService<MockRegistry> {
        let fallback = FallbackStore::open(dir.path().to_path_buf()).unwrap();
        FleetService::new(registry, fallback)
    }

    fn ids(vehicles: &[Vehicle]) -> Vec<&str> {
        vehicles.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn load_replaces_collection_and_mirrors_snapshot() {
        let dir = tempdir().unwrap();
        let registry = MockRegistry::new(vec![
            vehicle("v1", VehicleStatus::Active),
            vehicle("v2", VehicleStatus::Idle),
        ]);
        let mut service = service_with(registry, &dir);

        service.load().unwrap();
        assert_eq!(service.mode(), Mode::Online);
        assert_eq!(ids(service.vehicles()), ["v1", "v2"]);

        let mirrored = FallbackStore::open(dir.path().to_path_buf()).unwrap().read();
        assert_eq!(ids(&mirrored), ["v1", "v2"]);
    }

    #[test]
    fn load_twice_online_is_idempotent() {
        let dir = tempdir().unwrap();
        let registry = MockRegistry::new(vec![vehicle("v1", VehicleStatus::Active)]);
        let mut service = service_with(registry, &dir);

        service.load().unwrap();
        let first = service.vehicles().to_vec();
        service.load().unwrap();

        assert_eq!(service.vehicles(), first.as_slice());
        assert_eq!(service.mode(), Mode::Online);
        assert_eq!(service.registry.list_calls.get(), 2);
    }

    #[test]
    fn failed_load_falls_back_to_last_snapshot() {
        let dir = tempdir().unwrap();
        let fallback = FallbackStore::open(dir.path().to_path_buf()).unwrap();
        fallback
            .write(&[
                vehicle("v1", VehicleStatus::Active),
                vehicle("v2", VehicleStatus::Maintenance),
            ])
            .unwrap();

        let registry = MockRegistry::new(vec![]).down();
        let mut service = service_with(registry, &dir);
        service.load().unwrap();

        assert_eq!(service.mode(), Mode::Offline);
        assert_eq!(ids(service.vehicles()), ["v1", "v2"]);
    }

    #[test]
    fn failed_load_with_empty_store_uses_seed() {
        let dir = tempdir().unwrap();
        let registry = MockRegistry::new(vec![]).down();
        let mut service = service_with(registry, &dir);
        service.load().unwrap();

        assert_eq!(service.mode(), Mode::Offline);
        let seed_ids: Vec<String> = transitlink_store::seed::initial_vehicles()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(
            service.vehicles().iter().map(|v| v.id.clone()).collect::<Vec<_>>(),
            seed_ids
        );
    }

    #[test]
    fn online_add_keeps_remote_confirmed_value() {
        let dir = tempdir().unwrap();
        let registry = MockRegistry::new(vec![]);
        let mut service = service_with(registry, &dir);
        service.load().unwrap();

        service.add(vehicle("v1", VehicleStatus::Active)).unwrap();
        assert_eq!(service.mode(), Mode::Online);
        assert_eq!(ids(service.vehicles()), ["v1"]);
    }

    #[test]
    fn failed_mutation_applies_locally_and_demotes() {
        let dir = tempdir().unwrap();
        let registry = MockRegistry::new(vec![vehicle("v1", VehicleStatus::Active)]);
        let mut service = service_with(registry, &dir);
        service.load().unwrap();
        assert_eq!(service.mode(), Mode::Online);

        service.registry.available.set(false);
        service.add(vehicle("v2", VehicleStatus::Idle)).unwrap();

        assert_eq!(service.mode(), Mode::Offline);
        assert_eq!(ids(service.vehicles()), ["v1", "v2"]);
        let mirrored = FallbackStore::open(dir.path().to_path_buf()).unwrap().read();
        assert_eq!(ids(&mirrored), ["v1", "v2"]);
    }

    #[test]
    fn offline_mutations_never_probe_the_remote() {
        let dir = tempdir().unwrap();
        let registry = MockRegistry::new(vec![]).down();
        let mut service = service_with(registry, &dir);
        service.load().unwrap();
        assert_eq!(service.mode(), Mode::Offline);

        // Remote comes back, but only load() may notice
        service.registry.available.set(true);
        let before = service.registry.vehicles.borrow().len();
        service.add(vehicle("v9", VehicleStatus::Active)).unwrap();

        assert_eq!(service.mode(), Mode::Offline);
        assert_eq!(service.registry.vehicles.borrow().len(), before);
    }

    #[test]
    fn offline_add_update_delete_apply_in_order_to_snapshot() {
        let dir = tempdir().unwrap();
        let fallback = FallbackStore::open(dir.path().to_path_buf()).unwrap();
        fallback.write(&[vehicle("v1", VehicleStatus::Active)]).unwrap();

        let registry = MockRegistry::new(vec![]).down();
        let mut service = service_with(registry, &dir);
        service.load().unwrap();

        service.add(vehicle("v2", VehicleStatus::Active)).unwrap();
        service
            .update(vehicle("v2", VehicleStatus::Maintenance))
            .unwrap();
        service.delete("v1").unwrap();

        let snapshot = FallbackStore::open(dir.path().to_path_buf()).unwrap().read();
        assert_eq!(ids(&snapshot), ["v2"]);
        assert_eq!(snapshot[0].status, VehicleStatus::Maintenance);
    }

    #[test]
    fn offline_update_with_unknown_id_is_a_noop() {
        let dir = tempdir().unwrap();
        let fallback = FallbackStore::open(dir.path().to_path_buf()).unwrap();
        fallback.write(&[vehicle("v1", VehicleStatus::Active)]).unwrap();

        let registry = MockRegistry::new(vec![]).down();
        let mut service = service_with(registry, &dir);
        service.load().unwrap();

        service.update(vehicle("ghost", VehicleStatus::Idle)).unwrap();
        assert_eq!(ids(service.vehicles()), ["v1"]);
    }

    #[test]
    fn remote_not_found_on_delete_still_applies_locally() {
        let dir = tempdir().unwrap();
        let registry = MockRegistry::new(vec![vehicle("v1", VehicleStatus::Active)]);
        let mut service = service_with(registry, &dir);
        service.load().unwrap();

        // The collection still holds v1 locally, but the remote lost it
        service.registry.vehicles.borrow_mut().clear();
        service.delete("v1").unwrap();

        assert_eq!(service.mode(), Mode::Offline);
        assert!(service.vehicles().is_empty());
    }

    #[test]
    fn successful_load_after_offline_recovers_and_discards_local_edits() {
        let dir = tempdir().unwrap();
        let registry = MockRegistry::new(vec![vehicle("v1", VehicleStatus::Active)]).down();
        let mut service = service_with(registry, &dir);
        service.load().unwrap();
        assert_eq!(service.mode(), Mode::Offline);

        // Offline-only edit, then the remote comes back
        service.add(vehicle("v-local", VehicleStatus::Active)).unwrap();
        service.registry.available.set(true);
        service.load().unwrap();

        assert_eq!(service.mode(), Mode::Online);
        // The remote snapshot wins wholesale; the offline edit is gone
        assert_eq!(ids(service.vehicles()), ["v1"]);
        let mirrored = FallbackStore::open(dir.path().to_path_buf()).unwrap().read();
        assert_eq!(ids(&mirrored), ["v1"]);
    }

    #[test]
    fn offline_scenario_derives_critical_alert_from_snapshot() {
        // Remote down, fallback holds an active and a maintenance
        // vehicle; one CRITICAL alert comes out
        let dir = tempdir().unwrap();
        let fallback = FallbackStore::open(dir.path().to_path_buf()).unwrap();
        fallback
            .write(&[
                vehicle("v1", VehicleStatus::Active),
                vehicle("v2", VehicleStatus::Maintenance),
            ])
            .unwrap();

        let registry = MockRegistry::new(vec![vehicle("v1", VehicleStatus::Active)]).down();
        let mut service = service_with(registry, &dir);
        service.load().unwrap();

        assert_eq!(service.mode(), Mode::Offline);
        let alerts = service.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Critical);
        assert_eq!(alerts[0].id, "alert-v2");
    }
}
