//! PathPal CLI
//!
//! Command-line front end for pedestrian navigation: POI search, route
//! guidance and a simulated device location.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use application::ports::{PoiSearchPort, RoutePort, RouteQuery};
use application::services::{
    DEFAULT_BUFFER, ManeuverStep, NavigationService, describe_steps, direction_description,
    format_instruction, location_channel,
};
use clap::{Parser, Subcommand};
use domain::{GeoLocation, HeadingReading, PointOfInterest, RouteResponse, TurnType};
use infrastructure::{AppConfig, LoggingConfig, TmapAdapter, init_logging};
use tracing::info;

/// PathPal CLI
#[derive(Parser)]
#[command(name = "pathpal-cli")]
#[command(author, version, about = "PathPal pedestrian navigation CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./pathpal.toml if present)
    #[arg(short, long, env = "PATHPAL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search points of interest by keyword
    ///
    /// Example: pathpal-cli search 서울역 --lat 37.5665 --lon 126.978
    Search {
        /// Search keyword
        query: String,

        /// Latitude of the search center (default: configured center)
        #[arg(long, requires = "lon")]
        lat: Option<f64>,

        /// Longitude of the search center
        #[arg(long, requires = "lat")]
        lon: Option<f64>,

        /// Result page, starting at 1
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Fetch a walking route between two coordinates
    Route {
        /// Start latitude
        #[arg(long)]
        from_lat: f64,

        /// Start longitude
        #[arg(long)]
        from_lon: f64,

        /// Destination latitude
        #[arg(long)]
        to_lat: f64,

        /// Destination longitude
        #[arg(long)]
        to_lon: f64,

        /// Start name
        #[arg(long, default_value = "출발지")]
        from_name: String,

        /// Destination name
        #[arg(long, default_value = "목적지")]
        to_name: String,

        /// Print steps as JSON
        #[arg(long)]
        json: bool,
    },

    /// Simulate a device at a position and walk to the first search hit
    Navigate {
        /// Destination keyword
        query: String,

        /// Device latitude
        #[arg(long)]
        lat: f64,

        /// Device longitude
        #[arg(long)]
        lon: f64,

        /// Horizontal accuracy of the device position in meters
        #[arg(long)]
        accuracy: Option<f64>,

        /// Compass heading in degrees
        #[arg(long)]
        heading: Option<f64>,

        /// Print the final session state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a maneuver code is spoken, without network access
    Explain {
        /// TMAP turn type code
        #[arg(allow_negative_numbers = true)]
        turn_type: i32,

        /// Provider description to format
        #[arg(short, long, default_value = "")]
        description: String,
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

/// Logging settings for this run
///
/// Any `-v` replaces the configured filter; without it the file or
/// environment value stays in effect.
fn logging_for(config: &LoggingConfig, verbose: u8) -> LoggingConfig {
    if verbose == 0 {
        config.clone()
    } else {
        config
            .clone()
            .with_filter(log_filter_from_verbosity(verbose))
    }
}

/// Straight-line distance for display
fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Load and check configuration
fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = AppConfig::load(path).context("failed to load configuration")?;
    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}

/// One printed line per maneuver
fn format_step_line(index: usize, step: &ManeuverStep) -> String {
    let line = format!("{:>2}. {}", index + 1, step.instruction);
    let labels: Vec<&str> = [step.direction, step.road]
        .into_iter()
        .filter(|label| !label.is_empty())
        .collect();
    if labels.is_empty() {
        line
    } else {
        format!("{line} [{}]", labels.join(" · "))
    }
}

fn format_poi_line(index: usize, poi: &PointOfInterest) -> String {
    let position = poi
        .location
        .map_or_else(|| "좌표 없음".to_string(), |l| l.to_string());
    match &poi.address {
        Some(address) => format!("{:>2}. {} ({address}) {position}", index + 1, poi.name),
        None => format!("{:>2}. {} {position}", index + 1, poi.name),
    }
}

fn print_route(route: &RouteResponse, json: bool) -> anyhow::Result<()> {
    let steps = describe_steps(route);

    if json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }

    if let Some(summary) = route.summary() {
        let km = f64::from(summary.total_distance_m) / 1000.0;
        println!("🚶 {km:.1} km, 약 {}분", summary.total_minutes());
        println!();
    }
    for (index, step) in steps.iter().enumerate() {
        println!("{}", format_step_line(index, step));
    }
    println!();
    println!("🗺️  {} route points", route.polyline().len());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Explain needs neither configuration nor network
    if let Commands::Explain {
        turn_type,
        description,
    } = &cli.command
    {
        let turn = TurnType::from_code(*turn_type);
        println!("{turn}");
        let label = direction_description(*turn_type);
        if !label.is_empty() {
            println!("   label: {label}");
        }
        println!("   spoken: {}", format_instruction(description, *turn_type));
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;

    // Set up logging based on verbosity
    init_logging(&logging_for(&config.logging, cli.verbose))?;
    config.log_summary();

    let adapter = Arc::new(TmapAdapter::from_config(&config.tmap.to_tmap_config())?);

    match cli.command {
        Commands::Search {
            query,
            lat,
            lon,
            page,
        } => {
            let center = match (lat, lon) {
                (Some(lat), Some(lon)) => GeoLocation::new(lat, lon)?,
                _ => config
                    .navigation
                    .default_center
                    .to_geo_location()
                    .unwrap_or_else(GeoLocation::seoul_city_hall),
            };

            println!("🔎 {query} @ {center}");
            let pois = adapter.search_pois(&query, &center, page).await?;
            if pois.is_empty() {
                println!("No results");
            }
            for (index, poi) in pois.iter().enumerate() {
                println!("{}", format_poi_line(index, poi));
            }
        },

        Commands::Route {
            from_lat,
            from_lon,
            to_lat,
            to_lon,
            from_name,
            to_name,
            json,
        } => {
            let query = RouteQuery::new(
                GeoLocation::new(from_lat, from_lon)?,
                from_name,
                GeoLocation::new(to_lat, to_lon)?,
                to_name,
            )
            .with_preference(config.navigation.route_preference);

            let route = adapter.fetch_route(&query).await?;
            print_route(&route, json)?;
        },

        Commands::Navigate {
            query,
            lat,
            lon,
            accuracy,
            heading,
            json,
        } => {
            let navigation = config
                .navigation
                .to_navigation_config()
                .context("navigation.default_center is out of range")?;
            let service = NavigationService::new(adapter.clone(), adapter, navigation);

            let (publisher, provider) = location_channel(DEFAULT_BUFFER);
            publisher
                .publish_fix(lat, lon, accuracy, chrono::Utc::now())
                .await?;
            if let Some(degrees) = heading {
                publisher
                    .publish_heading(HeadingReading::new(degrees, degrees))
                    .await?;
            }
            drop(publisher);
            service.run_location_updates(provider).await;

            let results = service.search(&query, 1).await?;
            let destination = results
                .into_iter()
                .find(PointOfInterest::is_routable)
                .with_context(|| format!("no routable result for '{query}'"))?;
            let straight_line = service
                .snapshot()
                .user_location
                .zip(destination.location)
                .map(|(fix, to)| fix.location.distance_m(&to));
            info!(destination = %destination.name, ?straight_line, "Destination selected");
            match straight_line {
                Some(meters) => println!(
                    "📍 {} (직선 거리 {})",
                    destination.name,
                    format_distance(meters)
                ),
                None => println!("📍 {}", destination.name),
            }
            service.select_destination(destination);

            let route = service.fetch_route().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&service.snapshot())?);
            } else {
                print_route(&route, false)?;
            }
        },

        // Handled before configuration
        Commands::Explain { .. } => {},
    }

    Ok(())
}
