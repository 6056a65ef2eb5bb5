//! Command handlers

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use transitlink_app::repository::open_fleet_service;
use transitlink_app::{auth, Config, FleetService};
use transitlink_infra::HttpVehicleRegistry;
use transitlink_types::{Error, Location, OutputFormat, Result, Vehicle};

use crate::cli::{Cli, Commands};
use crate::output;

/// Apply global CLI overrides on top of the persisted config
fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(ref url) = cli.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(ref dir) = cli.store_dir {
        config.store_dir = Some(dir.clone());
    }
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    Ok(config)
}

/// Populate the service from the registry (or the fallback snapshot).
///
/// The spinner finishes when the blocking call actually returns; it is a
/// completion signal, not a timer.
fn load_fleet(
    service: &mut FleetService<HttpVehicleRegistry>,
    quiet: bool,
) -> Result<()> {
    if quiet {
        service.load()?;
        return Ok(());
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Syncing vehicle registry...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = service.load();
    spinner.finish_and_clear();
    result?;
    Ok(())
}

fn find_vehicle(service: &FleetService<HttpVehicleRegistry>, id: &str) -> Result<Vehicle> {
    service
        .vehicles()
        .iter()
        .find(|v| v.id == id)
        .cloned()
        .ok_or_else(|| Error::InvalidVehicle(format!("no vehicle with id {id}")))
}

pub fn execute(cli: Cli) -> Result<()> {
    let config = effective_config(&cli)?;
    let format = config.output_format;

    match cli.command {
        Commands::Sync => {
            let mut service = open_fleet_service(&config)?;
            load_fleet(&mut service, format == OutputFormat::Json)?;
            output::print_sync_summary(format, &service)?;
        }

        Commands::List => {
            let mut service = open_fleet_service(&config)?;
            load_fleet(&mut service, true)?;
            output::print_vehicles(format, service.vehicles())?;
        }

        Commands::Add {
            reg,
            kind,
            driver,
            capacity,
            lat,
            lng,
        } => {
            let mut service = open_fleet_service(&config)?;
            load_fleet(&mut service, true)?;

            let vehicle = Vehicle::new(reg, kind, driver, capacity, Location::now(lat, lng));
            let id = vehicle.id.clone();
            service.add(vehicle)?;

            let added = find_vehicle(&service, &id)?;
            output::print_mutation(format, "Registered", &added, &service)?;
        }

        Commands::Update {
            id,
            status,
            driver,
            reg,
            capacity,
            lat,
            lng,
        } => {
            let mut service = open_fleet_service(&config)?;
            load_fleet(&mut service, true)?;

            // Full replacement: start from the current record, apply overrides
            let mut vehicle = find_vehicle(&service, &id)?;
            if let Some(status) = status {
                vehicle.status = status;
            }
            if let Some(driver) = driver {
                vehicle.driver_name = driver;
            }
            if let Some(reg) = reg {
                vehicle.reg_number = reg;
            }
            if let Some(capacity) = capacity {
                vehicle.capacity = capacity;
            }
            if let (Some(lat), Some(lng)) = (lat, lng) {
                vehicle.record_location(Location::now(lat, lng));
            }
            service.update(vehicle)?;

            let updated = find_vehicle(&service, &id)?;
            output::print_mutation(format, "Updated", &updated, &service)?;
        }

        Commands::Delete { id } => {
            let mut service = open_fleet_service(&config)?;
            load_fleet(&mut service, true)?;

            // Resolve before deleting so an unknown id is a clear CLI error
            let vehicle = find_vehicle(&service, &id)?;
            service.delete(&id)?;
            output::print_mutation(format, "Decommissioned", &vehicle, &service)?;
        }

        Commands::Alerts => {
            let mut service = open_fleet_service(&config)?;
            load_fleet(&mut service, true)?;
            output::print_alerts(format, &service.alerts())?;
        }

        Commands::Status => {
            let mut service = open_fleet_service(&config)?;
            load_fleet(&mut service, true)?;
            output::print_status(format, &service)?;
        }

        Commands::Login { user, key } => {
            let user = auth::authenticate(&user, &key)?;
            output::print_user(format, &user)?;
        }

        Commands::Config {
            show,
            set_api_url,
            set_format,
        } => {
            let mut config = Config::load()?;
            let mut changed = false;
            if let Some(url) = set_api_url {
                config.api_base_url = url;
                changed = true;
            }
            if let Some(format) = set_format {
                config.output_format = format;
                changed = true;
            }
            if changed {
                config.save()?;
                println!("Configuration saved.");
            }
            if show || !changed {
                print!("{config}");
            }
        }
    }

    Ok(())
}
