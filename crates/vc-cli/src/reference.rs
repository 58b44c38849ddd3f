//! # Identifier Subcommands
//!
//! Reference-number generation and ABN checks.
//!
//! ```bash
//! vc booking-number --count 3
//! vc invoice-number
//! vc abn "51 824 753 556"
//! ```

use anyhow::Result;
use clap::Args;

use vc_core::{Abn, ReferenceGenerator};

/// Arguments for `vc booking-number` and `vc invoice-number`.
#[derive(Args, Debug)]
pub struct ReferenceArgs {
    /// How many references to generate.
    #[arg(long, default_value_t = 1)]
    pub count: u32,
}

/// Arguments for the `vc abn` subcommand.
#[derive(Args, Debug)]
pub struct AbnArgs {
    /// ABN to check; spaces between digit groups are allowed.
    #[arg(value_name = "ABN")]
    pub abn: String,
}

/// Which reference series to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `VC-{year}-{suffix}`.
    Booking,
    /// `VC-INV-{year}-{suffix}`.
    Invoice,
}

/// Execute the booking-number or invoice-number subcommand.
pub fn run_reference(kind: ReferenceKind, args: &ReferenceArgs) -> Result<u8> {
    let mut generator = ReferenceGenerator::system();
    for _ in 0..args.count {
        let reference = match kind {
            ReferenceKind::Booking => generator.booking_number().to_string(),
            ReferenceKind::Invoice => generator.invoice_number().to_string(),
        };
        println!("{reference}");
    }
    Ok(0)
}

/// Execute the abn subcommand.
///
/// Exit code 0 for a valid ABN, 1 otherwise.
pub fn run_abn(args: &AbnArgs) -> Result<u8> {
    match Abn::parse(&args.abn) {
        Ok(abn) => {
            println!("VALID: {abn}");
            Ok(0)
        }
        Err(e) => {
            tracing::debug!(error = %e, "ABN rejected");
            println!("INVALID: {e}");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_abn_exits_zero() {
        let args = AbnArgs {
            abn: "51 824 753 556".to_string(),
        };
        assert_eq!(run_abn(&args).unwrap(), 0);
    }

    #[test]
    fn invalid_abn_exits_one() {
        for abn in ["51824753557", "1234", "abcdefghijk"] {
            let args = AbnArgs {
                abn: abn.to_string(),
            };
            assert_eq!(run_abn(&args).unwrap(), 1, "{abn}");
        }
    }

    #[test]
    fn reference_generation_succeeds() {
        let args = ReferenceArgs { count: 3 };
        assert_eq!(run_reference(ReferenceKind::Booking, &args).unwrap(), 0);
        assert_eq!(run_reference(ReferenceKind::Invoice, &args).unwrap(), 0);
    }
}
