//! # vc-cli — Command-Line Interface for the Marketplace Core
//!
//! Provides the `vc` binary: a thin front end over `vc-core` so scripts,
//! support staff, and CI can compute exactly what the API computes.
//!
//! ## Subcommands
//!
//! - `vc score`, `vc below-cap` — Fair Price Score and price-cap headroom.
//! - `vc distance`, `vc geofence` — haversine distance and check-in fences.
//! - `vc booking-number`, `vc invoice-number`, `vc abn` — identifiers.
//! - `vc slugify`, `vc truncate`, `vc initials`, `vc currency`, `vc date` — text.
//! - `vc config` — print the effective configuration.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; every calculation lives in `vc-core`.
//! - Handlers return an exit code: 0 success, 1 negative answer.
//!   Errors propagate as `anyhow::Error` and exit 1 from `main`.

pub mod geo;
pub mod reference;
pub mod score;
pub mod text;

use anyhow::{Context, Result};

use vc_core::MarketConfig;

/// Execute the config subcommand: print the effective configuration.
pub fn run_config(config: &MarketConfig) -> Result<u8> {
    print!("{}", render_config(config)?);
    Ok(0)
}

fn render_config(config: &MarketConfig) -> Result<String> {
    config.to_yaml().context("failed to render configuration")
}
