//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used at the validation boundary of the VC core.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - The raw calculation functions ([`crate::score`], [`crate::geo`]) never
//!   return errors. They assume pre-validated input.
//! - Validating constructors (`ScoreInput::new`, `GeoPoint::new`, `Abn::new`)
//!   return [`ValidationError`] with the offending field and value.
//! - Configuration loading returns [`ConfigError`].

use thiserror::Error;

/// Top-level error type for the VC core.
#[derive(Error, Debug)]
pub enum VcError {
    /// Input rejected at the validation boundary.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Input rejected before it reaches the calculation core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A numeric field is outside its documented domain.
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable description of the accepted domain.
        expected: &'static str,
    },

    /// A numeric field is NaN or infinite.
    #[error("{field} must be a finite number, got {value}")]
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Not a `lat,lon` coordinate pair.
    #[error("invalid coordinate {0:?}: expected \"lat,lon\" in degrees")]
    InvalidCoordinate(String),

    /// Not a well-formed Australian Business Number.
    #[error("invalid ABN {0:?}: {1}")]
    InvalidAbn(String, &'static str),

    /// Not a well-formed booking or invoice reference number.
    #[error("invalid reference number {0:?}: {1}")]
    InvalidReference(String, &'static str),

    /// A scoring policy whose tiers would break score monotonicity.
    #[error("invalid scoring policy: {0}")]
    InvalidPolicy(String),
}

/// Error while loading a [`crate::config::MarketConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid YAML for the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The configuration parsed but holds inconsistent values.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// Reject NaN and infinities for `field`.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_field() {
        let err = ValidationError::OutOfRange {
            field: "rating",
            value: 7.0,
            expected: "between 0 and 5",
        };
        assert_eq!(err.to_string(), "rating must be between 0 and 5, got 7");
    }

    #[test]
    fn ensure_finite_rejects_nan_and_infinity() {
        assert!(ensure_finite("rate", 1.0).is_ok());
        assert!(matches!(
            ensure_finite("rate", f64::NAN),
            Err(ValidationError::NotFinite { field: "rate", .. })
        ));
        assert!(ensure_finite("rate", f64::INFINITY).is_err());
        assert!(ensure_finite("rate", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn validation_error_converts_into_top_level() {
        let err: VcError = ValidationError::InvalidAbn("123".into(), "must have 11 digits").into();
        assert!(matches!(err, VcError::Validation(_)));
        assert!(err.to_string().contains("123"));
    }
}
