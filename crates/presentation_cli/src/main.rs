//! Busway CLI
//!
//! Command-line interface for resolving bus route geometry and stop
//! timings.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::sync::Arc;

use application::RouteGeometryService;
use clap::{Parser, Subcommand};
use domain::TimedStop;
use infrastructure::{init_tracing, AppConfig, GeoapifyAdapter, TranzyAdapter};
use integration_geoapify::GeoapifyMatchingClient;
use integration_tranzy::TranzyOpendataClient;

/// Busway CLI
#[derive(Parser)]
#[command(name = "busway-cli")]
#[command(author, version, about = "Bus route geometry resolver", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (default: busway.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the line geometry of a route
    Route {
        /// Route short name as riders see it (e.g. "E8")
        short_name: String,

        /// Print the full GeoJSON Feature instead of a summary
        #[arg(long)]
        geojson: bool,
    },

    /// List the stops of a route with travel-time estimates
    Stops {
        /// Route short name as riders see it (e.g. "E8")
        short_name: String,

        /// Assumed constant bus speed in km/h (overrides configuration)
        #[arg(long)]
        speed_kmh: Option<f64>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format one row of the stop table
fn format_timed_stop(index: usize, timed: &TimedStop) -> String {
    let position = &timed.stop.position;
    if timed.minutes_to_next > 0.0 {
        format!(
            "{:>3}. {} ({position}), ~{:.1} min to next",
            index + 1,
            timed.stop.name,
            timed.minutes_to_next
        )
    } else {
        format!("{:>3}. {} ({position})", index + 1, timed.stop.name)
    }
}

/// Wire the resolution service from configuration
fn build_service(config: &AppConfig) -> anyhow::Result<RouteGeometryService> {
    let tranzy_client = TranzyOpendataClient::new(&config.tranzy.to_client_config()?)?;
    let geoapify_client = GeoapifyMatchingClient::new(&config.geoapify.to_client_config()?)?;

    Ok(RouteGeometryService::new(
        Arc::new(TranzyAdapter::new(tranzy_client)),
        Arc::new(GeoapifyAdapter::new(geoapify_client)),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(log_filter_from_verbosity(cli.verbose));

    let config = AppConfig::load(cli.config.as_deref())?;
    let service = build_service(&config)?;

    match cli.command {
        Commands::Route {
            short_name,
            geojson,
        } => {
            let geometry = service.resolve(&short_name).await?;

            if geojson {
                let feature = geometry.to_geojson(&short_name);
                println!("{}", serde_json::to_string_pretty(&feature)?);
            } else {
                println!(
                    "Route {short_name}: {} points, source: {}",
                    geometry.len(),
                    geometry.source
                );
            }
        },

        Commands::Stops {
            short_name,
            speed_kmh,
        } => {
            let speed = speed_kmh.unwrap_or(config.estimation.avg_speed_kmh);
            anyhow::ensure!(speed > 0.0, "speed must be positive, got {speed}");

            let stops = service.resolve_stops(&short_name, speed).await?;

            println!("Stops on route {short_name} (assumed speed {speed} km/h):");
            for (index, timed) in stops.iter().enumerate() {
                println!("{}", format_timed_stop(index, timed));
            }
        },
    }

    Ok(())
}
