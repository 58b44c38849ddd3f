//! # Geo Subcommands
//!
//! `vc distance` prints the great-circle distance between two points;
//! `vc geofence` checks whether they lie within a radius, defaulting to the
//! configured check-in radius. Exit code 1 means "outside".
//!
//! ```bash
//! vc distance --from=-33.8150,151.0011 --to=-33.8688,151.2093
//! vc geofence --from=-33.8688,151.2093 --to=-33.8689,151.2094 --radius-m 150
//! ```

use anyhow::{Context, Result};
use clap::Args;

use vc_core::{GeoPoint, Geofence, MarketConfig};

/// Arguments for the `vc distance` subcommand.
#[derive(Args, Debug)]
pub struct DistanceArgs {
    /// First point as `lat,lon` in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub from: GeoPoint,

    /// Second point as `lat,lon` in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub to: GeoPoint,
}

/// Arguments for the `vc geofence` subcommand.
#[derive(Args, Debug)]
pub struct GeofenceArgs {
    /// Fence centre as `lat,lon` in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub from: GeoPoint,

    /// Point to test as `lat,lon` in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub to: GeoPoint,

    /// Fence radius in metres. Defaults to the configured check-in radius.
    #[arg(long)]
    pub radius_m: Option<f64>,
}

/// Execute the distance subcommand.
pub fn run_distance(args: &DistanceArgs) -> Result<u8> {
    let km = args.from.distance_km(&args.to);
    tracing::debug!(from = %args.from, to = %args.to, km, "computed distance");
    println!("{km:.1} km");
    Ok(0)
}

/// Execute the geofence subcommand.
pub fn run_geofence(args: &GeofenceArgs, config: &MarketConfig) -> Result<u8> {
    let fence = build_fence(args, config)?;
    let inside = fence.contains(&args.to);
    let km = args.from.distance_km(&args.to);

    if inside {
        println!("INSIDE: {km:.1} km from centre (radius {} m)", fence.radius_meters());
        Ok(0)
    } else {
        println!("OUTSIDE: {km:.1} km from centre (radius {} m)", fence.radius_meters());
        Ok(1)
    }
}

fn build_fence(args: &GeofenceArgs, config: &MarketConfig) -> Result<Geofence> {
    let radius = args
        .radius_m
        .unwrap_or(config.geofence.check_in_radius_meters);
    Geofence::new(args.from, radius).context("invalid geofence radius")
}
