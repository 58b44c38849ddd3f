//! # vc-core — Marketplace Calculations
//!
//! The single source of truth for the business-critical math of the VC
//! disability-services marketplace. API handlers, background jobs, and the
//! `vc` CLI all depend on this crate rather than re-deriving formulas.
//!
//! ## Modules
//!
//! | Module       | Provides                                                |
//! |--------------|---------------------------------------------------------|
//! | [`score`]    | Fair Price Score, percentage below the NDIS cap         |
//! | [`geo`]      | Haversine distance, geofence containment                |
//! | [`identity`] | Booking/invoice reference numbers, ABN checksum         |
//! | [`text`]     | Currency/date formatting, slugs, truncation, initials   |
//! | [`config`]   | YAML-loaded scoring policy, locale, geofence defaults   |
//! | [`error`]    | `ValidationError`, `ConfigError`, `VcError`             |
//!
//! ## Crate Policy
//!
//! - No I/O outside [`config`]; every calculation is pure and synchronous.
//! - Raw functions (`calculate_fair_price_score`, `distance_in_km`, ...)
//!   do not validate. Validated entry points (`ScoreInput::new`,
//!   `GeoPoint::new`, `Abn::parse`) return `Result`.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Clock and randomness are injectable (`Clock`, `ReferenceGenerator`).

pub mod config;
pub mod error;
pub mod geo;
pub mod identity;
pub mod score;
pub mod text;

// Re-export primary types for ergonomic imports.
pub use config::MarketConfig;
pub use error::{ConfigError, ValidationError, VcError};
pub use geo::{distance_in_km, is_within_geofence, GeoPoint, Geofence, EARTH_RADIUS_KM};
pub use identity::{
    generate_booking_number, generate_invoice_number, is_valid_abn, Abn, BookingNumber, Clock,
    FixedClock, InvoiceNumber, ReferenceGenerator, SystemClock,
};
pub use score::{
    calculate_fair_price_score, percentage_below_cap, FairPriceBreakdown, FairPriceScore,
    ScoreEngine, ScoreInput, ScoringPolicy, DEFAULT_RATING_SCALE,
};
pub use text::{format_currency, format_date, initials, slugify, truncate, LocaleSettings};
