//! Seed fleet used when no fallback snapshot was ever written

use transitlink_types::{Location, Vehicle, VehicleStatus, VehicleType};

fn seeded(
    id: &str,
    reg_number: &str,
    kind: VehicleType,
    driver_name: &str,
    status: VehicleStatus,
    lat: f64,
    lng: f64,
    capacity: u32,
) -> Vehicle {
    let location = Location::now(lat, lng);
    Vehicle {
        id: id.to_string(),
        reg_number: reg_number.to_string(),
        kind,
        driver_name: driver_name.to_string(),
        status,
        last_location: location,
        history: vec![location],
        capacity,
    }
}

/// The default Karachi fleet
pub fn initial_vehicles() -> Vec<Vehicle> {
    vec![
        seeded(
            "v3",
            "KHI-5544",
            VehicleType::Van,
            "Zarrar Tariq",
            VehicleStatus::Active,
            24.9431,
            67.1255,
            15,
        ),
        seeded(
            "v4",
            "KHI-1122",
            VehicleType::Truck,
            "hamza",
            VehicleStatus::Active,
            24.9702,
            67.1398,
            8000,
        ),
        seeded(
            "v5",
            "KHI-3388",
            VehicleType::Rickshaw,
            "kashif khoso",
            VehicleStatus::Active,
            24.9555,
            67.162,
            3,
        ),
        seeded(
            "v6",
            "KHI-0041",
            VehicleType::Van,
            "DR fida hussain khoso",
            VehicleStatus::Maintenance,
            24.8615,
            67.0099,
            12,
        ),
        seeded(
            "v-1766952444139",
            "KHI-063",
            VehicleType::Truck,
            "SAAD AZIZ",
            VehicleStatus::Maintenance,
            24.9107,
            67.1156,
            2,
        ),
    ]
}
