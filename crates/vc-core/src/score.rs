//! # Fair Price Score — Provider Ranking Metric
//!
//! Computes the Fair Price Score, a composite 0–5 metric blending price
//! competitiveness against the NDIS cap, customer rating, responsiveness,
//! and booking completion reliability.
//!
//! ## Components
//!
//! | Component  | Range     | Rule                                             |
//! |------------|-----------|--------------------------------------------------|
//! | Price      | 0.5 – 1.5 | Step tiers on `rate / cap` (0.7, 0.85, 1.0)      |
//! | Rating     | 0 – 1.5   | `(rating / 5) * 1.5`                              |
//! | Response   | 0.2 – 1.0 | Step tiers on hours (2, 6, 24), lower is better   |
//! | Completion | 0 – 1.0   | `completion_rate / 100`                           |
//!
//! The total is rounded to one decimal place and capped at 5.0. There is
//! no lower clamp; the component floors make anything under 0.7
//! unreachable for in-domain input.
//!
//! The price component is a step function, not a curve. Providers are
//! rewarded for pricing meaningfully below the cap in discrete tiers.
//!
//! ## Two Entry Points
//!
//! - [`calculate_fair_price_score()`] is the raw, non-validating function.
//!   A zero cap yields an infinite (or NaN) ratio, which falls through every
//!   tier into the over-cap score. Out-of-range ratings or completion rates
//!   flow straight into the sum.
//! - [`ScoreEngine::score()`] takes a [`ScoreInput`], which can only be built
//!   through [`ScoreInput::new()`] and therefore always holds in-domain values.
//!
//! All thresholds and weights live in [`ScoringPolicy`]. They are tuned
//! business constants; `ScoringPolicy::default()` reproduces them exactly.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ValidationError};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// A price tier: any `rate / cap` ratio at or below `max_ratio` earns `score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceTier {
    /// Inclusive upper bound on the price-to-cap ratio.
    pub max_ratio: f64,
    /// Component score awarded within this tier.
    pub score: f64,
}

/// A response tier: any response time at or below `max_hours` earns `score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseTier {
    /// Inclusive upper bound on response time, in hours.
    pub max_hours: f64,
    /// Component score awarded within this tier.
    pub score: f64,
}

/// Thresholds and weights for the Fair Price Score.
///
/// Tiers are evaluated in order; the first tier whose bound is not exceeded
/// wins. Inputs beyond the last tier receive the fallback score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringPolicy {
    /// Price tiers in ascending `max_ratio` order.
    pub price_tiers: Vec<PriceTier>,
    /// Price score when the rate exceeds every tier (above the cap).
    pub over_cap_score: f64,
    /// Top of the rating scale.
    pub rating_scale: f64,
    /// Component score for a perfect rating.
    pub rating_weight: f64,
    /// Response tiers in ascending `max_hours` order.
    pub response_tiers: Vec<ResponseTier>,
    /// Response score when the response time exceeds every tier.
    pub slow_response_score: f64,
    /// Component score for a 100% completion rate.
    pub completion_weight: f64,
    /// Upper clamp applied after rounding.
    pub max_score: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            price_tiers: vec![
                PriceTier { max_ratio: 0.7, score: 1.5 },
                PriceTier { max_ratio: 0.85, score: 1.2 },
                PriceTier { max_ratio: 1.0, score: 1.0 },
            ],
            over_cap_score: 0.5,
            rating_scale: DEFAULT_RATING_SCALE,
            rating_weight: 1.5,
            response_tiers: vec![
                ResponseTier { max_hours: 2.0, score: 1.0 },
                ResponseTier { max_hours: 6.0, score: 0.8 },
                ResponseTier { max_hours: 24.0, score: 0.5 },
            ],
            slow_response_score: 0.2,
            completion_weight: 1.0,
            max_score: 5.0,
        }
    }
}

impl ScoringPolicy {
    /// Check that the policy keeps the score monotone in every input.
    ///
    /// Tier bounds must be strictly ascending and tier scores non-increasing,
    /// ending at or above the fallback score. Weights must be finite and
    /// non-negative; the rating scale and max score must be positive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let price: Vec<(f64, f64)> = self
            .price_tiers
            .iter()
            .map(|t| (t.max_ratio, t.score))
            .collect();
        check_tiers("price_tiers", &price, self.over_cap_score)?;

        let response: Vec<(f64, f64)> = self
            .response_tiers
            .iter()
            .map(|t| (t.max_hours, t.score))
            .collect();
        check_tiers("response_tiers", &response, self.slow_response_score)?;

        for (name, value) in [
            ("rating_weight", self.rating_weight),
            ("completion_weight", self.completion_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidPolicy(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("rating_scale", self.rating_scale),
            ("max_score", self.max_score),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::InvalidPolicy(format!(
                    "{name} must be a finite positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    fn price_component(&self, ratio: f64) -> f64 {
        self.price_tiers
            .iter()
            .find(|tier| ratio <= tier.max_ratio)
            .map_or(self.over_cap_score, |tier| tier.score)
    }

    fn response_component(&self, hours: f64) -> f64 {
        self.response_tiers
            .iter()
            .find(|tier| hours <= tier.max_hours)
            .map_or(self.slow_response_score, |tier| tier.score)
    }

    /// Compute every component from raw numbers, without validation.
    fn breakdown_raw(
        &self,
        rate: f64,
        ndis_cap_rate: f64,
        rating: f64,
        response_time_hours: f64,
        completion_rate: f64,
    ) -> FairPriceBreakdown {
        let price = self.price_component(rate / ndis_cap_rate);
        let rating = (rating / self.rating_scale) * self.rating_weight;
        let response = self.response_component(response_time_hours);
        let completion = (completion_rate / 100.0) * self.completion_weight;

        let total = price + rating + response + completion;
        let rounded = (total * 10.0).round() / 10.0;
        // Not f64::min, which would swallow a NaN total.
        let rounded = if rounded > self.max_score {
            self.max_score
        } else {
            rounded
        };

        FairPriceBreakdown {
            price,
            rating,
            response,
            completion,
            total,
            score: FairPriceScore(rounded),
        }
    }
}

fn check_tiers(name: &str, tiers: &[(f64, f64)], fallback: f64) -> Result<(), ValidationError> {
    let mut previous: Option<(f64, f64)> = None;
    for &(bound, score) in tiers {
        if !bound.is_finite() || !score.is_finite() {
            return Err(ValidationError::InvalidPolicy(format!(
                "{name} contains a non-finite bound or score"
            )));
        }
        if let Some((prev_bound, prev_score)) = previous {
            if bound <= prev_bound {
                return Err(ValidationError::InvalidPolicy(format!(
                    "{name} bounds must be strictly ascending ({prev_bound} then {bound})"
                )));
            }
            if score > prev_score {
                return Err(ValidationError::InvalidPolicy(format!(
                    "{name} scores must not increase ({prev_score} then {score})"
                )));
            }
        }
        previous = Some((bound, score));
    }
    if !fallback.is_finite() {
        return Err(ValidationError::InvalidPolicy(format!(
            "{name} fallback score must be finite"
        )));
    }
    if let Some((_, last_score)) = previous {
        if fallback > last_score {
            return Err(ValidationError::InvalidPolicy(format!(
                "{name} fallback score {fallback} exceeds last tier score {last_score}"
            )));
        }
    }
    Ok(())
}

/// Top of the rating scale in the default policy.
pub const DEFAULT_RATING_SCALE: f64 = 5.0;

fn default_policy() -> &'static ScoringPolicy {
    static POLICY: OnceLock<ScoringPolicy> = OnceLock::new();
    POLICY.get_or_init(ScoringPolicy::default)
}

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// Validated inputs to the Fair Price Score.
///
/// Fields are private: one is built through [`ScoreInput::new()`] or
/// [`ScoreEngine::input()`], so every instance is in-domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreInput {
    rate: f64,
    ndis_cap_rate: f64,
    rating: f64,
    response_time_hours: f64,
    completion_rate: f64,
}

impl ScoreInput {
    /// Validate and bundle score inputs against the default 5-point rating
    /// scale.
    ///
    /// Engines configured with a different `rating_scale` validate through
    /// [`ScoreEngine::input()`] instead.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NotFinite`] for NaN or infinite values.
    /// - [`ValidationError::OutOfRange`] if `rate` or `ndis_cap_rate` is not
    ///   positive, `rating` is outside 0–5, `response_time_hours` is negative,
    ///   or `completion_rate` is outside 0–100.
    pub fn new(
        rate: f64,
        ndis_cap_rate: f64,
        rating: f64,
        response_time_hours: f64,
        completion_rate: f64,
    ) -> Result<Self, ValidationError> {
        let input = Self::checked(rate, ndis_cap_rate, rating, response_time_hours, completion_rate)?;
        if input.rating > DEFAULT_RATING_SCALE {
            return Err(out_of_range("rating", input.rating, "between 0 and 5"));
        }
        Ok(input)
    }

    /// Every check except the upper rating bound, which depends on the policy.
    fn checked(
        rate: f64,
        ndis_cap_rate: f64,
        rating: f64,
        response_time_hours: f64,
        completion_rate: f64,
    ) -> Result<Self, ValidationError> {
        let rate = ensure_finite("rate", rate)?;
        let ndis_cap_rate = ensure_finite("ndis_cap_rate", ndis_cap_rate)?;
        let rating = ensure_finite("rating", rating)?;
        let response_time_hours = ensure_finite("response_time_hours", response_time_hours)?;
        let completion_rate = ensure_finite("completion_rate", completion_rate)?;

        if rate <= 0.0 {
            return Err(out_of_range("rate", rate, "greater than 0"));
        }
        if ndis_cap_rate <= 0.0 {
            return Err(out_of_range("ndis_cap_rate", ndis_cap_rate, "greater than 0"));
        }
        if rating < 0.0 {
            return Err(out_of_range("rating", rating, "at least 0"));
        }
        if response_time_hours < 0.0 {
            return Err(out_of_range(
                "response_time_hours",
                response_time_hours,
                "at least 0",
            ));
        }
        if !(0.0..=100.0).contains(&completion_rate) {
            return Err(out_of_range(
                "completion_rate",
                completion_rate,
                "between 0 and 100",
            ));
        }

        Ok(Self {
            rate,
            ndis_cap_rate,
            rating,
            response_time_hours,
            completion_rate,
        })
    }

    /// Hourly (or per-unit) rate charged by the provider.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// NDIS price cap for the service category.
    pub fn ndis_cap_rate(&self) -> f64 {
        self.ndis_cap_rate
    }

    /// Average customer rating, on the scoring policy's rating scale.
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Typical response time in hours.
    pub fn response_time_hours(&self) -> f64 {
        self.response_time_hours
    }

    /// Booking completion rate as a percentage.
    pub fn completion_rate(&self) -> f64 {
        self.completion_rate
    }
}

fn out_of_range(field: &'static str, value: f64, expected: &'static str) -> ValidationError {
    ValidationError::OutOfRange {
        field,
        value,
        expected,
    }
}

/// A Fair Price Score: at most one decimal place, never above the policy max.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FairPriceScore(f64);

impl FairPriceScore {
    /// The numeric score.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for FairPriceScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl From<FairPriceScore> for f64 {
    fn from(score: FairPriceScore) -> Self {
        score.0
    }
}

/// Per-component contributions behind a [`FairPriceScore`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FairPriceBreakdown {
    /// Price tier score.
    pub price: f64,
    /// Weighted rating score.
    pub rating: f64,
    /// Response tier score.
    pub response: f64,
    /// Weighted completion score.
    pub completion: f64,
    /// Unrounded sum of the components.
    pub total: f64,
    /// Final rounded and capped score.
    pub score: FairPriceScore,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Scores validated inputs under a fixed [`ScoringPolicy`].
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    policy: ScoringPolicy,
}

impl ScoreEngine {
    /// Build an engine for `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPolicy`] if the policy would break
    /// score monotonicity.
    pub fn new(policy: ScoringPolicy) -> Result<Self, ValidationError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Validate and bundle score inputs, bounding the rating by this
    /// engine's `rating_scale`.
    ///
    /// # Errors
    ///
    /// As [`ScoreInput::new()`], except that `rating` may range up to the
    /// policy's rating scale rather than 5.
    pub fn input(
        &self,
        rate: f64,
        ndis_cap_rate: f64,
        rating: f64,
        response_time_hours: f64,
        completion_rate: f64,
    ) -> Result<ScoreInput, ValidationError> {
        let input =
            ScoreInput::checked(rate, ndis_cap_rate, rating, response_time_hours, completion_rate)?;
        if input.rating > self.policy.rating_scale {
            return Err(out_of_range(
                "rating",
                input.rating,
                "between 0 and the policy rating scale",
            ));
        }
        Ok(input)
    }

    /// The policy this engine applies.
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Compute the score for `input`.
    pub fn score(&self, input: &ScoreInput) -> FairPriceScore {
        self.breakdown(input).score
    }

    /// Compute the score for `input` along with each component.
    pub fn breakdown(&self, input: &ScoreInput) -> FairPriceBreakdown {
        let breakdown = self.policy.breakdown_raw(
            input.rate,
            input.ndis_cap_rate,
            input.rating,
            input.response_time_hours,
            input.completion_rate,
        );
        tracing::trace!(
            price = breakdown.price,
            rating = breakdown.rating,
            response = breakdown.response,
            completion = breakdown.completion,
            score = breakdown.score.value(),
            "computed fair price score"
        );
        breakdown
    }

    /// Percentage below cap for `input`.
    pub fn percentage_below_cap(&self, input: &ScoreInput) -> u32 {
        percentage_below_cap(input.rate, input.ndis_cap_rate)
    }
}

// ---------------------------------------------------------------------------
// Raw functions
// ---------------------------------------------------------------------------

/// Compute the Fair Price Score with the default policy, without validation.
///
/// Callers must reject zero or negative caps and out-of-range ratings
/// upstream; see [`ScoreInput::new()`].
pub fn calculate_fair_price_score(
    rate: f64,
    ndis_cap_rate: f64,
    rating: f64,
    response_time_hours: f64,
    completion_rate: f64,
) -> f64 {
    default_policy()
        .breakdown_raw(
            rate,
            ndis_cap_rate,
            rating,
            response_time_hours,
            completion_rate,
        )
        .score
        .value()
}

/// Whole-number percentage by which `rate` sits below `ndis_cap_rate`.
///
/// Zero whenever the rate is at or above the cap; never negative.
pub fn percentage_below_cap(rate: f64, ndis_cap_rate: f64) -> u32 {
    if rate >= ndis_cap_rate {
        return 0;
    }
    let percent = ((ndis_cap_rate - rate) / ndis_cap_rate * 100.0).round();
    // Saturating cast: NaN maps to 0, negatives clamp to 0.
    percent as u32
}
