//! # Text Subcommands
//!
//! Thin wrappers over the formatting helpers, so listing slugs and invoice
//! amounts can be produced the same way from shell scripts.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use vc_core::{format_currency, format_date, initials, slugify, truncate, MarketConfig};

/// Arguments for the `vc slugify` subcommand.
#[derive(Args, Debug)]
pub struct SlugifyArgs {
    /// Text to turn into a URL slug.
    pub text: String,
}

/// Arguments for the `vc truncate` subcommand.
#[derive(Args, Debug)]
pub struct TruncateArgs {
    /// Text to shorten.
    pub text: String,

    /// Maximum number of characters kept before the ellipsis.
    #[arg(long)]
    pub length: usize,
}

/// Arguments for the `vc initials` subcommand.
#[derive(Args, Debug)]
pub struct InitialsArgs {
    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,
}

/// Arguments for the `vc currency` subcommand.
#[derive(Args, Debug)]
pub struct CurrencyArgs {
    /// Amount to format.
    #[arg(allow_negative_numbers = true)]
    pub amount: f64,
}

/// Arguments for the `vc date` subcommand.
#[derive(Args, Debug)]
pub struct DateArgs {
    /// Date in `YYYY-MM-DD` form.
    pub date: String,
}

/// Execute the slugify subcommand.
pub fn run_slugify(args: &SlugifyArgs) -> Result<u8> {
    println!("{}", slugify(&args.text));
    Ok(0)
}

/// Execute the truncate subcommand.
pub fn run_truncate(args: &TruncateArgs) -> Result<u8> {
    println!("{}", truncate(&args.text, args.length));
    Ok(0)
}

/// Execute the initials subcommand.
pub fn run_initials(args: &InitialsArgs) -> Result<u8> {
    println!("{}", initials(&args.first_name, &args.last_name));
    Ok(0)
}

/// Execute the currency subcommand.
pub fn run_currency(args: &CurrencyArgs, config: &MarketConfig) -> Result<u8> {
    println!("{}", format_currency(args.amount, &config.locale));
    Ok(0)
}

/// Execute the date subcommand.
pub fn run_date(args: &DateArgs, config: &MarketConfig) -> Result<u8> {
    println!("{}", render_date(&args.date, config)?);
    Ok(0)
}

fn render_date(raw: &str, config: &MarketConfig) -> Result<String> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("expected YYYY-MM-DD, got {raw:?}"))?;
    Ok(format_date(date, &config.locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_date_uses_locale() {
        let out = render_date("2026-10-15", &MarketConfig::default()).unwrap();
        assert_eq!(out, "15 Oct 2026");
    }

    #[test]
    fn render_date_rejects_garbage() {
        let err = render_date("15/10/2026", &MarketConfig::default()).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }
}
