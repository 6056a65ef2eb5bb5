//! Alert derivation service

use transitlink_types::{Vehicle, VehicleStatus};

use crate::model::{Alert, AlertKind};

/// Derive the full alert list from the current vehicle collection.
///
/// Pure function: one CRITICAL per vehicle in maintenance, one WARNING per
/// idle vehicle, nothing for active vehicles. Output order follows the
/// input's iteration order, not severity.
pub fn derive_alerts(vehicles: &[Vehicle]) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for vehicle in vehicles {
        match vehicle.status {
            VehicleStatus::Maintenance => alerts.push(Alert {
                id: format!("alert-{}", vehicle.id),
                kind: AlertKind::Critical,
                message: format!("Unit {} offline for maintenance.", vehicle.reg_number),
                node: vehicle.reg_number.clone(),
                time: "Just now".to_string(),
            }),
            VehicleStatus::Idle => alerts.push(Alert {
                id: format!("idle-{}", vehicle.id),
                kind: AlertKind::Warning,
                message: format!("Node {} is stationary.", vehicle.reg_number),
                node: vehicle.reg_number.clone(),
                time: "5 mins ago".to_string(),
            }),
            VehicleStatus::Active => {}
        }
    }
    alerts
}
