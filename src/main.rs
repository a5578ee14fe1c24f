//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `geo_probe` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Choosing between a one-shot probe and the API server
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use geo_probe::initialization::init_logger_with;
use geo_probe::server::start_api_server;
use geo_probe::{run_probe, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Some(port) = config.api_port {
        return start_api_server(port, config).await;
    }

    if config.endpoint.is_none() {
        eprintln!("geo_probe error: an endpoint is required unless --api-port is set");
        process::exit(2);
    }

    match run_probe(config).await {
        Ok(report) => {
            println!(
                "Probed {} location{} in {:.1}s: {} record{} ({} raw), {} divergent",
                report.locations_probed,
                if report.locations_probed == 1 { "" } else { "s" },
                report.elapsed_seconds,
                report.records.len(),
                if report.records.len() == 1 { "" } else { "s" },
                report.raw_records,
                report.divergent
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("geo_probe error: {:#}", e);
            process::exit(1);
        }
    }
}
