//! TransitLink - fleet tracking console
//!
//! Operator CLI for the vehicle registry: syncs against the remote REST
//! service and keeps working from the local fallback snapshot when the
//! backend is unreachable.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use tracing::Level;

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
