//! # vc CLI entry point
//!
//! Parses command-line arguments, loads the market configuration, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vc_cli::geo::{run_distance, run_geofence, DistanceArgs, GeofenceArgs};
use vc_cli::reference::{run_abn, run_reference, AbnArgs, ReferenceArgs, ReferenceKind};
use vc_cli::run_config;
use vc_cli::score::{run_below_cap, run_score, BelowCapArgs, ScoreArgs};
use vc_cli::text::{
    run_currency, run_date, run_initials, run_slugify, run_truncate, CurrencyArgs, DateArgs,
    InitialsArgs, SlugifyArgs, TruncateArgs,
};
use vc_core::MarketConfig;

/// VC marketplace toolchain.
///
/// Computes Fair Price Scores, distances and geofences, reference numbers,
/// ABN checks, and locale-aware formatting exactly as the platform does.
#[derive(Parser, Debug)]
#[command(name = "vc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// `RUST_LOG`, when set, overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    json_logs: bool,

    /// Path to a market configuration file (YAML).
    #[arg(long, global = true, env = "VC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a provider's Fair Price Score.
    Score(ScoreArgs),

    /// Percentage by which a rate sits below the NDIS cap.
    BelowCap(BelowCapArgs),

    /// Great-circle distance between two points.
    Distance(DistanceArgs),

    /// Check whether a point lies inside a geofence.
    Geofence(GeofenceArgs),

    /// Validate an Australian Business Number.
    Abn(AbnArgs),

    /// Generate booking reference numbers.
    BookingNumber(ReferenceArgs),

    /// Generate invoice reference numbers.
    InvoiceNumber(ReferenceArgs),

    /// Turn text into a URL slug.
    Slugify(SlugifyArgs),

    /// Shorten text with an ellipsis.
    Truncate(TruncateArgs),

    /// Initials from a first and last name.
    Initials(InitialsArgs),

    /// Format an amount in the configured currency.
    Currency(CurrencyArgs),

    /// Format a date in the configured locale.
    Date(DateArgs),

    /// Print the effective configuration as YAML.
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins when set; otherwise the level follows -v.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_level(cli.verbose)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = match MarketConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Score(args) => run_score(&args, &config),
        Commands::BelowCap(args) => run_below_cap(&args),
        Commands::Distance(args) => run_distance(&args),
        Commands::Geofence(args) => run_geofence(&args, &config),
        Commands::Abn(args) => run_abn(&args),
        Commands::BookingNumber(args) => run_reference(ReferenceKind::Booking, &args),
        Commands::InvoiceNumber(args) => run_reference(ReferenceKind::Invoice, &args),
        Commands::Slugify(args) => run_slugify(&args),
        Commands::Truncate(args) => run_truncate(&args),
        Commands::Initials(args) => run_initials(&args),
        Commands::Currency(args) => run_currency(&args, &config),
        Commands::Date(args) => run_date(&args, &config),
        Commands::Config => run_config(&config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_score() {
        let cli = Cli::try_parse_from([
            "vc",
            "score",
            "--rate",
            "50",
            "--cap",
            "100",
            "--rating",
            "4.5",
            "--response-hours",
            "1",
            "--completion",
            "95",
        ])
        .unwrap();
        if let Commands::Score(args) = cli.command {
            assert_eq!(args.rate, 50.0);
            assert_eq!(args.cap, 100.0);
            assert_eq!(args.rating, 4.5);
            assert_eq!(args.response_hours, 1.0);
            assert_eq!(args.completion, 95.0);
            assert!(!args.json);
        } else {
            panic!("expected score command");
        }
    }

    #[test]
    fn cli_parse_score_requires_every_input() {
        assert!(Cli::try_parse_from(["vc", "score", "--rate", "50"]).is_err());
    }

    #[test]
    fn cli_parse_distance_with_negative_latitude() {
        let cli = Cli::try_parse_from([
            "vc",
            "distance",
            "--from",
            "-33.8150,151.0011",
            "--to=-33.8688,151.2093",
        ])
        .unwrap();
        if let Commands::Distance(args) = cli.command {
            assert_eq!(args.from.latitude(), -33.8150);
            assert_eq!(args.to.longitude(), 151.2093);
        } else {
            panic!("expected distance command");
        }
    }

    #[test]
    fn cli_parse_distance_rejects_out_of_range_point() {
        assert!(
            Cli::try_parse_from(["vc", "distance", "--from", "95,0", "--to", "0,0"]).is_err()
        );
    }

    #[test]
    fn cli_parse_geofence_default_radius() {
        let cli =
            Cli::try_parse_from(["vc", "geofence", "--from", "0,0", "--to", "0,0.001"]).unwrap();
        if let Commands::Geofence(args) = cli.command {
            assert!(args.radius_m.is_none());
        } else {
            panic!("expected geofence command");
        }
    }

    #[test]
    fn cli_parse_reference_count() {
        let cli = Cli::try_parse_from(["vc", "invoice-number", "--count", "4"]).unwrap();
        if let Commands::InvoiceNumber(args) = cli.command {
            assert_eq!(args.count, 4);
        } else {
            panic!("expected invoice-number command");
        }
    }

    #[test]
    fn cli_parse_negative_currency() {
        let cli = Cli::try_parse_from(["vc", "currency", "-12.5"]).unwrap();
        if let Commands::Currency(args) = cli.command {
            assert_eq!(args.amount, -12.5);
        } else {
            panic!("expected currency command");
        }
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(verbosity_level(0), "warn");
        assert_eq!(verbosity_level(1), "info");
        assert_eq!(verbosity_level(2), "debug");
        assert_eq!(verbosity_level(3), "trace");
        assert_eq!(verbosity_level(9), "trace");
    }

    #[test]
    fn cli_parse_global_flags() {
        let cli = Cli::try_parse_from(["vc", "-vv", "--config", "market.yaml", "config"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.json_logs);
        assert_eq!(cli.config, Some(PathBuf::from("market.yaml")));
        assert!(matches!(cli.command, Commands::Config));
    }
}
