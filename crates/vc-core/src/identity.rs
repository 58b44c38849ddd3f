//! # Identifiers — Reference Numbers and ABNs
//!
//! Human-readable booking and invoice reference numbers, and the
//! Australian Business Number (ABN) checksum.
//!
//! ## Reference Numbers
//!
//! - Booking: `VC-{year}-{suffix}`, e.g. `VC-2026-7K2Q9D`
//! - Invoice: `VC-INV-{year}-{suffix}`, e.g. `VC-INV-2026-0QZ4MB`
//!
//! The suffix is six uppercase base-36 characters. These are display
//! references, not security tokens, and they are not guaranteed unique:
//! collisions are the persistence layer's concern (a unique constraint).
//!
//! The year and suffix come from an injected [`Clock`] and random source
//! (see [`ReferenceGenerator`]) so tests can pin both. The free functions
//! [`generate_booking_number()`] and [`generate_invoice_number()`] use the
//! system clock and the thread-local RNG.
//!
//! ## ABN Checksum
//!
//! 1. Exactly 11 ASCII digits.
//! 2. Subtract 1 from the first digit.
//! 3. Weighted sum with [`ABN_WEIGHTS`].
//! 4. Valid iff the sum is divisible by 89.

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Validating `Deserialize` for string newtypes: deserialize a plain
/// `String`, then route it through the type's `parse()` constructor.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of the current time for year-stamping references.
pub trait Clock {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Reference numbers
// ---------------------------------------------------------------------------

/// Length of the random suffix on reference numbers.
pub const REFERENCE_SUFFIX_LEN: usize = 6;

const BASE36_UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn random_suffix<R: Rng>(rng: &mut R) -> String {
    (0..REFERENCE_SUFFIX_LEN)
        .map(|_| char::from(BASE36_UPPER[rng.gen_range(0..BASE36_UPPER.len())]))
        .collect()
}

/// Split `s` into year and suffix after `prefix`, checking the shape.
fn parse_reference<'a>(s: &'a str, prefix: &str) -> Result<(i32, &'a str), ValidationError> {
    let invalid = |reason| ValidationError::InvalidReference(s.to_string(), reason);

    let rest = s.strip_prefix(prefix).ok_or_else(|| invalid("wrong prefix"))?;
    let (year, suffix) = rest
        .split_once('-')
        .ok_or_else(|| invalid("missing year separator"))?;

    if year.len() < 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("year must be at least four digits"));
    }
    if suffix.len() != REFERENCE_SUFFIX_LEN
        || !suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
    {
        return Err(invalid("suffix must be six uppercase base-36 characters"));
    }
    let year = year.parse().map_err(|_| invalid("year out of range"))?;
    Ok((year, suffix))
}

macro_rules! reference_number {
    ($(#[$meta:meta])* $ty:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $ty {
            value: String,
            year: i32,
        }

        impl_validating_deserialize!($ty);

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.value)
            }
        }

        impl $ty {
            /// Literal prefix preceding the year.
            pub const PREFIX: &'static str = $prefix;

            fn from_parts(year: i32, suffix: &str) -> Self {
                Self {
                    value: format!("{}{:04}-{}", Self::PREFIX, year, suffix),
                    year,
                }
            }

            /// Parse and validate an existing reference.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::InvalidReference`] if the prefix,
            /// year, or suffix is malformed.
            pub fn parse(s: &str) -> Result<Self, ValidationError> {
                let (year, _) = parse_reference(s, Self::PREFIX)?;
                Ok(Self {
                    value: s.to_string(),
                    year,
                })
            }

            /// Calendar year stamped into the reference.
            pub fn year(&self) -> i32 {
                self.year
            }

            /// Random six-character suffix.
            pub fn suffix(&self) -> &str {
                &self.value[self.value.len() - REFERENCE_SUFFIX_LEN..]
            }

            /// The full reference string.
            pub fn as_str(&self) -> &str {
                &self.value
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.value)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

reference_number!(
    /// Booking reference, `VC-{year}-{suffix}`.
    BookingNumber,
    "VC-"
);

reference_number!(
    /// Invoice reference, `VC-INV-{year}-{suffix}`.
    InvoiceNumber,
    "VC-INV-"
);

/// Generates reference numbers from an injected clock and random source.
#[derive(Debug, Clone)]
pub struct ReferenceGenerator<C, R> {
    clock: C,
    rng: R,
}

impl ReferenceGenerator<SystemClock, rand::rngs::ThreadRng> {
    /// Generator backed by the system clock and the thread-local RNG.
    pub fn system() -> Self {
        Self::new(SystemClock, rand::thread_rng())
    }
}

impl<C: Clock, R: Rng> ReferenceGenerator<C, R> {
    /// Build a generator from a clock and random source.
    pub fn new(clock: C, rng: R) -> Self {
        Self { clock, rng }
    }

    /// A fresh booking reference for the current year.
    pub fn booking_number(&mut self) -> BookingNumber {
        let year = self.clock.now().year();
        BookingNumber::from_parts(year, &random_suffix(&mut self.rng))
    }

    /// A fresh invoice reference for the current year.
    pub fn invoice_number(&mut self) -> InvoiceNumber {
        let year = self.clock.now().year();
        InvoiceNumber::from_parts(year, &random_suffix(&mut self.rng))
    }
}

/// A fresh booking reference stamped with the current UTC year.
pub fn generate_booking_number() -> BookingNumber {
    ReferenceGenerator::system().booking_number()
}

/// A fresh invoice reference stamped with the current UTC year.
pub fn generate_invoice_number() -> InvoiceNumber {
    ReferenceGenerator::system().invoice_number()
}

// ---------------------------------------------------------------------------
// ABN
// ---------------------------------------------------------------------------

/// Positional weights for the ABN checksum.
pub const ABN_WEIGHTS: [i64; 11] = [10, 1, 3, 5, 7, 9, 11, 13, 15, 17, 19];

const ABN_MODULUS: i64 = 89;

/// Whether `abn` is exactly 11 ASCII digits with a valid checksum.
///
/// Never panics; anything malformed is simply `false`.
pub fn is_valid_abn(abn: &str) -> bool {
    if abn.len() != 11 || !abn.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let sum: i64 = abn
        .bytes()
        .zip(ABN_WEIGHTS)
        .enumerate()
        .map(|(i, (b, weight))| {
            let digit = i64::from(b - b'0');
            let digit = if i == 0 { digit - 1 } else { digit };
            digit * weight
        })
        .sum();
    sum.rem_euclid(ABN_MODULUS) == 0
}

/// Australian Business Number with a verified checksum.
///
/// Stored as 11 bare digits; displayed in the `NN NNN NNN NNN` grouping
/// used on invoices and the ABN Lookup register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Abn(String);

impl_validating_deserialize!(Abn);

impl Abn {
    /// Parse an ABN, accepting spaces between digit groups.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAbn`] if the input does not hold
    /// exactly 11 digits or the checksum fails.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != 11 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidAbn(
                s.to_string(),
                "must contain exactly 11 digits",
            ));
        }
        if !is_valid_abn(&digits) {
            return Err(ValidationError::InvalidAbn(
                s.to_string(),
                "checksum does not match",
            ));
        }
        Ok(Self(digits))
    }

    /// The 11 digits without grouping.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Abn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = &self.0;
        write!(f, "{} {} {} {}", &d[0..2], &d[2..5], &d[5..8], &d[8..11])
    }
}

impl std::str::FromStr for Abn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
