//! Output formatting module

use serde_json::json;

use transitlink_app::FleetService;
use transitlink_app::auth::User;
use transitlink_domain::model::Alert;
use transitlink_domain::repository::VehicleRegistry;
use transitlink_types::{OutputFormat, Result, Vehicle, VehicleStatus};

fn mode_banner<R: VehicleRegistry>(service: &FleetService<R>) -> &'static str {
    if service.is_offline() {
        "Local Storage Mode"
    } else {
        "Live Backend Connected"
    }
}

pub fn print_sync_summary<R: VehicleRegistry>(
    format: OutputFormat,
    service: &FleetService<R>,
) -> Result<()> {
    if format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&json!({
            "mode": service.mode().label(),
            "vehicles": service.vehicles().len(),
            "alerts": service.alerts().len(),
        }))?;
        println!("{}", content);
    } else {
        println!("Sync complete [{}]", mode_banner(service));
        println!(
            "{} vehicles, {} alerts",
            service.vehicles().len(),
            service.alerts().len()
        );
    }
    Ok(())
}

pub fn print_vehicles(format: OutputFormat, vehicles: &[Vehicle]) -> Result<()> {
    if format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(vehicles)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nFleet Registry");
    println!("==============");
    if vehicles.is_empty() {
        println!("(no vehicles)");
        return Ok(());
    }
    println!(
        "{:<24} {:<10} {:<10} {:<12} {:<22} {:>9} {:>10}",
        "ID", "Reg", "Type", "Status", "Driver", "Capacity", "Last fix"
    );
    println!("{}", "-".repeat(102));
    for v in vehicles {
        println!(
            "{:<24} {:<10} {:<10} {:<12} {:<22} {:>9} {:>9.4},{:.4}",
            truncate_str(&v.id, 23),
            v.reg_number,
            v.kind.label(),
            v.status.label(),
            truncate_str(&v.driver_name, 21),
            v.capacity,
            v.last_location.lat,
            v.last_location.lng,
        );
    }
    Ok(())
}

pub fn print_mutation<R: VehicleRegistry>(
    format: OutputFormat,
    action: &str,
    vehicle: &Vehicle,
    service: &FleetService<R>,
) -> Result<()> {
    if format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&json!({
            "action": action,
            "mode": service.mode().label(),
            "vehicle": vehicle,
        }))?;
        println!("{}", content);
    } else {
        println!(
            "{} {} ({}) [{}]",
            action,
            vehicle.reg_number,
            vehicle.id,
            mode_banner(service)
        );
    }
    Ok(())
}

pub fn print_alerts(format: OutputFormat, alerts: &[Alert]) -> Result<()> {
    if format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(alerts)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nStatus Alerts");
    println!("=============");
    if alerts.is_empty() {
        println!("(no alerts)");
        return Ok(());
    }
    for alert in alerts {
        println!(
            "[{:<8}] {:<10} {}  ({})",
            alert.kind.label(),
            alert.node,
            alert.message,
            alert.time
        );
    }
    Ok(())
}

pub fn print_status<R: VehicleRegistry>(
    format: OutputFormat,
    service: &FleetService<R>,
) -> Result<()> {
    let vehicles = service.vehicles();
    let count = |status: VehicleStatus| vehicles.iter().filter(|v| v.status == status).count();
    let active = count(VehicleStatus::Active);
    let idle = count(VehicleStatus::Idle);
    let maintenance = count(VehicleStatus::Maintenance);

    if format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&json!({
            "mode": service.mode().label(),
            "total": vehicles.len(),
            "active": active,
            "idle": idle,
            "maintenance": maintenance,
        }))?;
        println!("{}", content);
    } else {
        println!("\nFleet Status [{}]", mode_banner(service));
        println!("Total:        {}", vehicles.len());
        println!("Active:       {}", active);
        println!("Idle:         {}", idle);
        println!("Maintenance:  {}", maintenance);
    }
    Ok(())
}

pub fn print_user(format: OutputFormat, user: &User) -> Result<()> {
    if format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(user)?;
        println!("{}", content);
    } else {
        println!("Access granted: {} ({:?})", user.name, user.role);
    }
    Ok(())
}

fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}
