//! Core vehicle types shared across the workspace
//!
//! Wire shape matches the registry's REST contract: camelCase fields,
//! `type` for the vehicle kind, millisecond timestamps.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Vehicle category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum VehicleType {
    Truck,
    Bus,
    Rickshaw,
    Van,
}

impl VehicleType {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Truck => "Truck",
            VehicleType::Bus => "Bus",
            VehicleType::Rickshaw => "Rickshaw",
            VehicleType::Van => "Van",
        }
    }
}

/// Operational status of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum VehicleStatus {
    Active,
    Idle,
    Maintenance,
}

impl VehicleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "Active",
            VehicleStatus::Idle => "Idle",
            VehicleStatus::Maintenance => "Maintenance",
        }
    }
}

/// A single GPS fix, timestamped in milliseconds since the epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: i64,
}

impl Location {
    /// A fix at the given coordinates, timestamped now
    pub fn now(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// A tracked fleet asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique identifier, immutable after creation
    pub id: String,
    /// Registration plate (e.g., "KHI-5544")
    pub reg_number: String,
    #[serde(rename = "type")]
    pub kind: VehicleType,
    pub driver_name: String,
    pub status: VehicleStatus,
    /// Most recent known position
    pub last_location: Location,
    /// Past positions, append-only, insertion order = chronological order
    #[serde(default)]
    pub history: Vec<Location>,
    /// Seating or payload capacity
    #[serde(default)]
    pub capacity: u32,
}

impl Vehicle {
    /// Register a new vehicle at the given location.
    ///
    /// History is seeded with the creation location so it is never empty.
    pub fn new(
        reg_number: String,
        kind: VehicleType,
        driver_name: String,
        capacity: u32,
        location: Location,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            reg_number,
            kind,
            driver_name,
            status: VehicleStatus::Active,
            last_location: location,
            history: vec![location],
            capacity,
        }
    }

    pub fn with_status(mut self, status: VehicleStatus) -> Self {
        self.status = status;
        self
    }

    /// Append a position to the history and move `last_location` with it.
    ///
    /// This is the only place the history/last_location link is maintained;
    /// direct field edits do not keep them in sync.
    pub fn record_location(&mut self, location: Location) {
        self.history.push(location);
        self.last_location = location;
    }
}
