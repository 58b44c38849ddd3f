//! # Score Subcommands
//!
//! `vc score` computes a provider's Fair Price Score under the configured
//! scoring policy; `vc below-cap` reports how far a rate sits under the
//! NDIS cap.
//!
//! ```bash
//! vc score --rate 55 --cap 65.47 --rating 4.9 --response-hours 5 --completion 100
//! vc score --rate 55 --cap 65.47 --rating 4.9 --response-hours 5 --completion 100 --json
//! vc below-cap --rate 55 --cap 65.47
//! ```

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use vc_core::{percentage_below_cap, FairPriceBreakdown, MarketConfig, ScoreEngine, ScoreInput};

/// Arguments for the `vc score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Rate charged by the provider.
    #[arg(long)]
    pub rate: f64,

    /// NDIS price cap for the service category.
    #[arg(long)]
    pub cap: f64,

    /// Average customer rating, 0 to 5.
    #[arg(long)]
    pub rating: f64,

    /// Typical response time in hours.
    #[arg(long)]
    pub response_hours: f64,

    /// Booking completion rate, 0 to 100.
    #[arg(long)]
    pub completion: f64,

    /// Print the full component breakdown as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `vc below-cap` subcommand.
#[derive(Args, Debug)]
pub struct BelowCapArgs {
    /// Rate charged by the provider.
    #[arg(long)]
    pub rate: f64,

    /// NDIS price cap for the service category.
    #[arg(long)]
    pub cap: f64,
}

#[derive(Serialize)]
struct ScoreReport {
    #[serde(flatten)]
    breakdown: FairPriceBreakdown,
    percentage_below_cap: u32,
}

/// Execute the score subcommand.
pub fn run_score(args: &ScoreArgs, config: &MarketConfig) -> Result<u8> {
    let engine = ScoreEngine::new(config.scoring.clone()).context("invalid scoring policy")?;
    let input = engine
        .input(
            args.rate,
            args.cap,
            args.rating,
            args.response_hours,
            args.completion,
        )
        .context("rejected score input")?;

    println!("{}", render_score(&engine, &input, args.json)?);
    Ok(0)
}

fn render_score(engine: &ScoreEngine, input: &ScoreInput, json: bool) -> Result<String> {
    let breakdown = engine.breakdown(input);
    tracing::info!(score = breakdown.score.value(), "computed fair price score");

    if json {
        let report = ScoreReport {
            breakdown,
            percentage_below_cap: engine.percentage_below_cap(input),
        };
        return serde_json::to_string_pretty(&report).context("failed to serialize score");
    }
    Ok(breakdown.score.to_string())
}

/// Execute the below-cap subcommand.
pub fn run_below_cap(args: &BelowCapArgs) -> Result<u8> {
    anyhow::ensure!(
        args.cap.is_finite() && args.cap > 0.0,
        "cap must be a positive number, got {}",
        args.cap
    );
    anyhow::ensure!(
        args.rate.is_finite(),
        "rate must be a finite number, got {}",
        args.rate
    );
    println!("{}%", percentage_below_cap(args.rate, args.cap));
    Ok(0)
}
