//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use transitlink_types::{OutputFormat, VehicleStatus, VehicleType};

#[derive(Parser)]
#[command(name = "transitlink")]
#[command(version)]
#[command(about = "Fleet tracking console for the TransitLink vehicle registry")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL override
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Fallback store directory override
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refresh the vehicle collection from the remote registry
    Sync,

    /// List the current vehicle collection
    List,

    /// Register a new vehicle
    Add {
        /// Registration plate (e.g., "KHI-5544")
        #[arg(long)]
        reg: String,

        /// Vehicle category
        #[arg(long, value_enum)]
        kind: VehicleType,

        /// Driver name
        #[arg(long)]
        driver: String,

        /// Seating or payload capacity
        #[arg(long, default_value_t = 0)]
        capacity: u32,

        /// Current latitude
        #[arg(long)]
        lat: f64,

        /// Current longitude
        #[arg(long)]
        lng: f64,
    },

    /// Update an existing vehicle (full replacement of the record)
    Update {
        /// Vehicle id
        id: String,

        /// New status
        #[arg(long, value_enum)]
        status: Option<VehicleStatus>,

        /// New driver name
        #[arg(long)]
        driver: Option<String>,

        /// New registration plate
        #[arg(long)]
        reg: Option<String>,

        /// New capacity
        #[arg(long)]
        capacity: Option<u32>,

        /// Record a new position (requires --lng as well)
        #[arg(long, requires = "lng")]
        lat: Option<f64>,

        /// Record a new position (requires --lat as well)
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
    },

    /// Remove a vehicle from the registry
    Delete {
        /// Vehicle id
        id: String,
    },

    /// Show alerts derived from the current collection
    Alerts,

    /// Show connectivity mode and fleet summary
    Status,

    /// Validate operator credentials
    Login {
        /// Operator username
        #[arg(long, short = 'u')]
        user: String,

        /// Node access key
        #[arg(long, short = 'k')]
        key: String,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the API base URL
        #[arg(long)]
        set_api_url: Option<String>,

        /// Set the default output format
        #[arg(long)]
        set_format: Option<OutputFormat>,
    },
}
