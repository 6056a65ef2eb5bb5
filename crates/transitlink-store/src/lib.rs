//! Local fallback store: the last known-good vehicle collection
//!
//! Holds exactly one snapshot under a fixed file name, full replacement
//! semantics only. No diffing, no merge.

pub mod seed;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use tracing::warn;
use transitlink_types::{Error, Result, Vehicle};

/// File name the snapshot is kept under, the storage key
pub const FALLBACK_KEY: &str = "transitlink_fallback_data.json";

/// Persistent store for the fallback vehicle snapshot
pub struct FallbackStore {
    store_path: PathBuf,
}

impl FallbackStore {
    /// Create or locate the store under the given directory
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join(FALLBACK_KEY);
        Ok(Self { store_path })
    }

    pub fn store_path(&self) -> &PathBuf {
        &self.store_path
    }

    /// Read the last written snapshot.
    ///
    /// Returns the seed collection if nothing was ever written or the file
    /// cannot be parsed; reading never fails.
    pub fn read(&self) -> Vec<Vehicle> {
        if !self.store_path.exists() {
            return seed::initial_vehicles();
        }
        match File::open(&self.store_path) {
            Ok(file) => {
                let reader = BufReader::new(file);
                serde_json::from_reader(reader).unwrap_or_else(|e| {
                    warn!("Fallback snapshot unreadable, using seed data: {e}");
                    seed::initial_vehicles()
                })
            }
            Err(e) => {
                warn!("Fallback snapshot unreadable, using seed data: {e}");
                seed::initial_vehicles()
            }
        }
    }

    /// Overwrite the snapshot wholesale with the given collection
    pub fn write(&self, vehicles: &[Vehicle]) -> Result<()> {
        let file = File::create(&self.store_path)
            .map_err(|e| Error::LocalPersist(format!("{}: {e}", self.store_path.display())))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, vehicles)
            .map_err(|e| Error::LocalPersist(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use transitlink_types::{Location, Vehicle, VehicleStatus, VehicleType};

    fn sample_vehicle(id: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            reg_number: format!("KHI-{id}"),
            kind: VehicleType::Bus,
            driver_name: "driver".to_string(),
            status: VehicleStatus::Active,
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
            capacity: 40,
        }
    }

    fn seed_ids() -> Vec<String> {
        seed::initial_vehicles().into_iter().map(|v| v.id).collect()
    }

    fn ids(vehicles: &[Vehicle]) -> Vec<String> {
        vehicles.iter().map(|v| v.id.clone()).collect()
    }

    #[test]
    fn read_returns_seed_when_never_written() {
        let dir = tempdir().unwrap();
        let store = FallbackStore::open(dir.path().to_path_buf()).unwrap();
        let vehicles = store.read();
        // Seed timestamps are taken at call time, so compare identity only
        assert_eq!(ids(&vehicles), seed_ids());
        assert!(!vehicles.is_empty());
    }

    #[test]
    fn write_then_read_round_trips_wholesale() {
        let dir = tempdir().unwrap();
        let store = FallbackStore::open(dir.path().to_path_buf()).unwrap();

        let first = vec![sample_vehicle("v1"), sample_vehicle("v2")];
        store.write(&first).unwrap();
        assert_eq!(store.read(), first);

        // Second write fully replaces the first, no merge
        let second = vec![sample_vehicle("v3")];
        store.write(&second).unwrap();
        assert_eq!(store.read(), second);
    }

    #[test]
    fn corrupted_snapshot_falls_back_to_seed() {
        let dir = tempdir().unwrap();
        let store = FallbackStore::open(dir.path().to_path_buf()).unwrap();
        let mut file = File::create(store.store_path()).unwrap();
        file.write_all(b"{not json").unwrap();
        assert_eq!(ids(&store.read()), seed_ids());
    }

    #[test]
    fn write_to_unwritable_path_surfaces_local_persist_error() {
        let dir = tempdir().unwrap();
        let store = FallbackStore::open(dir.path().to_path_buf()).unwrap();
        // Turn the snapshot path into a directory so File::create fails
        fs::create_dir(store.store_path()).unwrap();
        let err = store.write(&[sample_vehicle("v1")]).unwrap_err();
        assert!(matches!(err, Error::LocalPersist(_)));
    }
}
