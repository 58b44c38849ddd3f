//! # Reference Vectors — Public API
//!
//! Known-answer vectors for the calculations that API handlers and
//! background jobs persist against provider and booking records. If these
//! change, stored scores and distances no longer match freshly computed
//! ones, so every vector here is pinned to an exact value.

use vc_core::{
    calculate_fair_price_score, distance_in_km, is_valid_abn, is_within_geofence,
    percentage_below_cap, slugify, truncate, Abn, BookingNumber, FixedClock, GeoPoint, Geofence,
    MarketConfig, ReferenceGenerator, ScoreEngine, ScoreInput, ValidationError,
};

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ---------------------------------------------------------------------------
// Fair Price Score
// ---------------------------------------------------------------------------

/// (rate, cap, rating, response hours, completion %, expected score)
const SCORE_VECTORS: &[(f64, f64, f64, f64, f64, f64)] = &[
    (50.0, 100.0, 4.5, 1.0, 95.0, 4.8),
    (65.47, 65.47, 4.0, 3.0, 88.0, 3.9),
    (55.0, 65.47, 4.9, 5.0, 100.0, 4.5),
    (70.0, 65.47, 3.0, 30.0, 60.0, 2.2),
    (40.0, 65.47, 5.0, 0.5, 100.0, 5.0),
    (80.0, 100.0, 2.5, 12.0, 75.0, 3.2),
];

#[test]
fn score_vectors_match() {
    for &(rate, cap, rating, hours, completion, expected) in SCORE_VECTORS {
        let raw = calculate_fair_price_score(rate, cap, rating, hours, completion);
        assert!(
            approx(raw, expected),
            "score({rate}, {cap}, {rating}, {hours}, {completion}) = {raw}, want {expected}"
        );

        let input = ScoreInput::new(rate, cap, rating, hours, completion).unwrap();
        let validated = ScoreEngine::default().score(&input);
        assert!(approx(validated.value(), raw));
    }
}

#[test]
fn validated_and_raw_paths_agree_under_loaded_config() {
    let config = MarketConfig::from_yaml_str("{}").unwrap();
    let engine = ScoreEngine::new(config.scoring).unwrap();
    let input = ScoreInput::new(50.0, 100.0, 4.5, 1.0, 95.0).unwrap();
    assert_eq!(engine.score(&input).to_string(), "4.8");
    assert_eq!(engine.percentage_below_cap(&input), 50);
}

#[test]
fn zero_cap_is_rejected_at_the_boundary_only() {
    assert!(matches!(
        ScoreInput::new(50.0, 0.0, 4.5, 1.0, 95.0),
        Err(ValidationError::OutOfRange { field: "ndis_cap_rate", .. })
    ));
    // The raw function still returns a deterministic value.
    assert!(calculate_fair_price_score(50.0, 0.0, 4.5, 1.0, 95.0).is_finite());
}

#[test]
fn percentage_below_cap_vectors() {
    assert_eq!(percentage_below_cap(55.0, 65.47), 16);
    assert_eq!(percentage_below_cap(65.47, 65.47), 0);
    assert_eq!(percentage_below_cap(70.0, 65.47), 0);
}

// ---------------------------------------------------------------------------
// Geo
// ---------------------------------------------------------------------------

#[test]
fn distance_vectors() {
    // Parramatta to Sydney CBD.
    assert_eq!(distance_in_km(-33.8150, 151.0011, -33.8688, 151.2093), 20.1);
    assert_eq!(distance_in_km(-33.8688, 151.2093, -33.8150, 151.0011), 20.1);
}

#[test]
fn check_in_geofence() {
    let config = MarketConfig::default();
    let booking = GeoPoint::new(-33.8688, 151.2093).unwrap();
    let fence = Geofence::new(booking, config.geofence.check_in_radius_meters).unwrap();

    let at_door = GeoPoint::new(-33.8689, 151.2094).unwrap();
    let across_town = GeoPoint::new(-33.8150, 151.0011).unwrap();

    assert!(fence.contains(&at_door));
    assert!(!fence.contains(&across_town));
    assert!(is_within_geofence(-33.8688, 151.2093, -33.8688, 151.2093, 0.0));
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[test]
fn abn_vectors() {
    assert!(is_valid_abn("51824753556"));
    assert!(!is_valid_abn("51824753557"));
    assert!(!is_valid_abn("51 824 753 556"));
    assert_eq!(Abn::parse("51 824 753 556").unwrap().as_str(), "51824753556");
}

#[test]
fn pinned_clock_reference_numbers() {
    let clock = FixedClock(Utc.with_ymd_and_hms(2027, 12, 31, 23, 59, 59).unwrap());
    let mut gen = ReferenceGenerator::new(clock, StdRng::seed_from_u64(42));
    let booking = gen.booking_number();
    assert_eq!(booking.year(), 2027);
    assert_eq!(BookingNumber::parse(booking.as_str()).unwrap(), booking);
    assert!(gen.invoice_number().as_str().starts_with("VC-INV-2027-"));
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

#[test]
fn text_vectors() {
    assert_eq!(slugify("Hello, World!  Test_Case"), "hello-world-test-case");
    assert_eq!(truncate("abcdefgh", 5), "abcde...");
}
